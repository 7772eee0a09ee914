//! Output formatting for calendar augmentations.
//!
//! Two renderings are provided:
//! - **TTY**: human-readable lines with optional OSC8 hyperlinks
//! - **JSON**: machine-readable object with every link spelled out

use std::borrow::Cow;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::augment::{Augmentation, ButtonAction};
use crate::links::CalendarTarget;
use crate::time::{ParseZone, iso_string};


/// The output format for an augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "2:30 PM").
    H12,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum length for the jam title (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Whether to wrap button labels in OSC8 hyperlinks.
    pub hyperlinks: bool,
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Zone the start and end times are shown in.
    pub display_zone: ParseZone,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            hyperlinks: false,
            time_format: TimeFormat::H24,
            display_zone: ParseZone::Local,
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAugmentation {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Start time, full ISO-8601 UTC.
    pub start: String,
    /// End time, full ISO-8601 UTC.
    pub end: String,
    pub google_url: Option<String>,
    pub outlook_url: Option<String>,
    pub ics_filename: Option<String>,
    pub ics_data_url: Option<String>,
}

/// Output formatter for augmentations.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Renders `aug` in `format`.
    pub fn render(&self, aug: &Augmentation, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Tty => Ok(self.format_tty(aug).join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(&self.format_json(aug)),
        }
    }

    /// Formats an augmentation as terminal lines.
    ///
    /// The first line is the title, the second the time range, then one
    /// line per button.
    pub fn format_tty(&self, aug: &Augmentation) -> Vec<String> {
        let payload = &aug.payload;
        let title = match self.options.max_title_length {
            Some(max) => ellipsis(payload.title(), max),
            None => Cow::Borrowed(payload.title()),
        };

        let mut lines = vec![
            title.into_owned(),
            format!(
                "  {} → {} ({})",
                self.format_time(payload.start()),
                self.format_time(payload.end()),
                self.options.display_zone
            ),
        ];

        for button in &aug.buttons {
            let line = match &button.action {
                ButtonAction::Open { url } if self.options.hyperlinks => {
                    make_hyperlink(url.as_str(), &button.label)
                }
                ButtonAction::Open { url } => format!("{}: {}", button.label, url),
                ButtonAction::Download { file } => format!("{}: {}", button.label, file.filename),
            };
            lines.push(format!("  {}", line));
        }

        lines
    }

    /// Formats an augmentation as a JSON-serializable structure.
    pub fn format_json(&self, aug: &Augmentation) -> JsonAugmentation {
        let payload = &aug.payload;
        let mut out = JsonAugmentation {
            title: payload.title().to_string(),
            description: payload.description().to_string(),
            location: payload.location().to_string(),
            start: iso_string(&payload.start()),
            end: iso_string(&payload.end()),
            google_url: None,
            outlook_url: None,
            ics_filename: None,
            ics_data_url: None,
        };

        for button in &aug.buttons {
            match (button.target, &button.action) {
                (CalendarTarget::Google, ButtonAction::Open { url }) => {
                    out.google_url = Some(url.to_string());
                }
                (CalendarTarget::Outlook, ButtonAction::Open { url }) => {
                    out.outlook_url = Some(url.to_string());
                }
                (_, ButtonAction::Download { file }) => {
                    out.ics_filename = Some(file.filename.clone());
                    out.ics_data_url = Some(file.data_url());
                }
                _ => {}
            }
        }

        out
    }

    fn format_time(&self, dt: DateTime<Utc>) -> String {
        let pattern = match self.options.time_format {
            TimeFormat::H24 => "%a %d %b %Y %H:%M",
            TimeFormat::H12 => "%a %d %b %Y %-I:%M %p",
        };
        match self.options.display_zone {
            ParseZone::Local => dt.with_timezone(&Local).format(pattern).to_string(),
            ParseZone::Utc => dt.format(pattern).to_string(),
            ParseZone::Fixed(offset) => dt.with_timezone(&offset).format(pattern).to_string(),
        }
    }
}

/// Truncates a string to a maximum length, adding ellipsis if needed.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    // \e]8;;URL\e\\LABEL\e]8;;\e\\
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}
