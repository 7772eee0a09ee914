//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/jamcal/config.toml` by default. Every section is optional.
//!
//! ```toml
//! [parser]
//! timezone = "+01:00"
//!
//! [event]
//! location = "Discord"
//! description_template = "Game jam from {url}"
//!
//! [page]
//! date = ".date_data"
//! title = ".jam_title_header a"
//! ```

use std::path::{Path, PathBuf};

use jamcal_core::{
    CalendarLinkBuilder, DateRangeParser, EventDefaults, FormatOptions, NaturalDateParser,
    PageSelectors, ParseZone, TimeFormat, TracingConfig, TracingOutputFormat,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::Cli;

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the jamcal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Date parsing settings.
    pub parser: ParserSettings,

    /// Fixed event fields.
    pub event: EventDefaults,

    /// Selectors used to scrape jam pages.
    pub page: PageSelectors,

    /// Calendar endpoints.
    pub links: LinkSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// Where files are written.
    pub output: OutputSettings,
}

/// Date parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Timezone for dates without an offset.
    pub timezone: ParseZone,

    /// Year assumed for dates written without one (defaults to the current year).
    pub reference_year: Option<i32>,
}

/// Calendar endpoint overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Google Calendar template endpoint.
    pub google_base: Option<Url>,

    /// Outlook compose endpoint.
    pub outlook_base: Option<Url>,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Wrap links in OSC8 terminal hyperlinks.
    pub hyperlinks: bool,

    /// Clock style for start and end times.
    pub time_format: TimeFormat,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory `.ics` files are saved to when no directory is given.
    pub ics_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        Self::load_if_exists(&Self::default_path())
    }

    /// Loads `path` if it exists, else returns the defaults.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_if_exists(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jamcal")
    }

    /// Applies command-line overrides on top of the file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.debug {
            self.debug = true;
        }
        if let Some(zone) = cli.timezone {
            self.parser.timezone = zone;
        }
        if let Some(year) = cli.year {
            self.parser.reference_year = Some(year);
        }
        if let Some(ref location) = cli.location {
            self.event.location = location.clone();
        }
        if let Some(max) = cli.max_title_length {
            self.display.max_title_length = Some(max);
        }
        if cli.hyperlinks {
            self.display.hyperlinks = true;
        }
    }

    /// Tracing settings: the debug preset when `debug` is set.
    pub fn tracing_config(&self, format: TracingOutputFormat) -> TracingConfig {
        let base = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::default()
        };
        base.with_format(format)
    }

    /// Builds the date-range parser described by `[parser]`.
    pub fn date_range_parser(&self) -> DateRangeParser {
        let mut dates = NaturalDateParser::new(self.parser.timezone);
        if let Some(year) = self.parser.reference_year {
            dates = dates.with_reference_year(year);
        }
        DateRangeParser::with_date_parser(dates)
    }

    /// Builds the link builder described by `[links]`.
    pub fn link_builder(&self) -> CalendarLinkBuilder {
        let mut builder = CalendarLinkBuilder::new();
        if let Some(ref base) = self.links.google_base {
            builder = builder.with_google_base(base.clone());
        }
        if let Some(ref base) = self.links.outlook_base {
            builder = builder.with_outlook_base(base.clone());
        }
        builder
    }

    /// Builds the formatter options; times are shown in the parser zone.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_title_length: self.display.max_title_length,
            hyperlinks: self.display.hyperlinks,
            time_format: self.display.time_format,
            display_zone: self.parser.timezone,
        }
    }

    /// Directory `.ics` files go to when none is given on the command line.
    pub fn ics_dir(&self) -> PathBuf {
        self.output
            .ics_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
