//! Core types: date-range parsing, event payloads, calendar links, formatting

pub mod augment;
pub mod date;
pub mod error;
pub mod event;
pub mod format;
pub mod ics;
pub mod links;
pub mod page;
pub mod parse;
pub mod time;
pub mod tracing;

pub use augment::{Augmentation, ButtonAction, CalendarButton, EventDefaults, augment};
pub use date::NaturalDateParser;
pub use error::{FormatError, PageError};
pub use event::EventPayload;
pub use format::{FormatOptions, JsonAugmentation, OutputFormat, OutputFormatter, TimeFormat};
pub use ics::{CalendarFile, ics_body};
pub use links::{CalendarLinkBuilder, CalendarTarget};
pub use page::{JamPage, PageSelectors};
pub use parse::{DateRange, DateRangeParser};
pub use time::{ParseZone, iso_string, stamp};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
