//! "Add to calendar" link building.
//!
//! This module turns an [`EventPayload`] into:
//! - a Google Calendar template URL (`dates=<start>/<end>`, stripped stamps)
//! - an Outlook deeplink URL (`startdt`/`enddt`, full ISO-8601)
//! - a downloadable [`CalendarFile`]
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use jamcal_core::event::EventPayload;
//! use jamcal_core::links::CalendarLinkBuilder;
//!
//! let payload = EventPayload::new(
//!     "Winter Jam",
//!     Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 1, 3, 17, 0, 0).unwrap(),
//! );
//! let url = CalendarLinkBuilder::new().google_url(&payload);
//! assert!(url.as_str().contains("dates=20250101T100000Z%2F20250103T170000Z"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::event::EventPayload;
use crate::ics::CalendarFile;
use crate::time::{iso_string, stamp};

/// Google Calendar event template endpoint.
pub const GOOGLE_CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";

/// Outlook.com compose deeplink endpoint.
pub const OUTLOOK_CALENDAR_BASE: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// The calendars an event can be added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarTarget {
    Google,
    Outlook,
    IcsFile,
}

impl CalendarTarget {
    /// All targets, in button order.
    pub const ALL: [CalendarTarget; 3] = [Self::Google, Self::Outlook, Self::IcsFile];

    /// Returns the button label for this target.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Google => "🗓 Google Calendar",
            Self::Outlook => "📧 Outlook",
            Self::IcsFile => "📥 Apple / .ics",
        }
    }

    /// Returns a short machine-friendly name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Outlook => "outlook",
            Self::IcsFile => "ics",
        }
    }
}

impl fmt::Display for CalendarTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds calendar links for an event.
///
/// Endpoints default to the public Google and Outlook URLs and can be
/// pointed elsewhere, e.g. a Workspace domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLinkBuilder {
    google_base: Url,
    outlook_base: Url,
}

impl Default for CalendarLinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarLinkBuilder {
    /// Creates a builder for the public endpoints.
    pub fn new() -> Self {
        Self {
            google_base: Url::parse(GOOGLE_CALENDAR_BASE).expect("Invalid Google base URL"),
            outlook_base: Url::parse(OUTLOOK_CALENDAR_BASE).expect("Invalid Outlook base URL"),
        }
    }

    /// Uses `base` for Google links.
    #[must_use]
    pub fn with_google_base(mut self, base: Url) -> Self {
        self.google_base = base;
        self
    }

    /// Uses `base` for Outlook links.
    #[must_use]
    pub fn with_outlook_base(mut self, base: Url) -> Self {
        self.outlook_base = base;
        self
    }

    /// Builds a Google Calendar template URL.
    pub fn google_url(&self, payload: &EventPayload) -> Url {
        let mut url = self.google_base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("action", "TEMPLATE")
            .append_pair("text", payload.title())
            .append_pair("details", payload.description())
            .append_pair("location", payload.location())
            .append_pair("dates", &google_dates(payload));
        url
    }

    /// Builds an Outlook compose deeplink.
    pub fn outlook_url(&self, payload: &EventPayload) -> Url {
        let mut url = self.outlook_base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("subject", payload.title())
            .append_pair("body", payload.description())
            .append_pair("startdt", &iso_string(&payload.start()))
            .append_pair("enddt", &iso_string(&payload.end()))
            .append_pair("location", payload.location());
        url
    }

    /// Builds the downloadable calendar file.
    pub fn calendar_file(&self, payload: &EventPayload) -> CalendarFile {
        CalendarFile::for_event(payload)
    }
}

/// Google's `dates` value: `<start>/<end>` in stripped form.
pub fn google_dates(payload: &EventPayload) -> String {
    format!("{}/{}", stamp(&payload.start()), stamp(&payload.end()))
}
