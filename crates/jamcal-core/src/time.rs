//! Timestamp rendering and the zone used for naive dates.
//!
//! Calendar services accept two spellings of the same UTC instant:
//! - the **stripped** form `YYYYMMDDTHHMMSSZ` (Google, `.ics` files)
//! - the **full** ISO-8601 form `YYYY-MM-DDTHH:MM:SS.mmmZ` (Outlook)
//!
//! [`ParseZone`] decides which timezone a date without an explicit offset
//! ("January 1 10:00 AM") is read in.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `strftime` pattern of the stripped timestamp.
pub const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// `strftime` pattern of the full ISO-8601 timestamp.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

static OFFSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])(\d{2}):?(\d{2})$").expect("Invalid offset regex")
});

/// Renders `dt` as `YYYYMMDDTHHMMSSZ`, dropping sub-second precision.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use jamcal_core::time::stamp;
///
/// let dt = Utc.with_ymd_and_hms(2025, 1, 3, 17, 0, 0).unwrap();
/// assert_eq!(stamp(&dt), "20250103T170000Z");
/// ```
pub fn stamp(dt: &DateTime<Utc>) -> String {
    dt.format(STAMP_FORMAT).to_string()
}

/// Renders `dt` as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_string(dt: &DateTime<Utc>) -> String {
    dt.format(ISO_FORMAT).to_string()
}

/// Reads a stripped timestamp back (ISO-8601 basic format, UTC).
pub fn parse_stamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), STAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Timezone used to interpret dates that carry no offset of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParseZone {
    /// The system's local timezone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl ParseZone {
    /// Converts a wall-clock time in this zone to UTC.
    ///
    /// Ambiguous local times (DST fold) resolve to the earliest instant.
    /// Returns `None` for times skipped by a DST transition.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Utc => Some(Utc.from_utc_datetime(&naive)),
            Self::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Returns the calendar year of `now` as seen from this zone.
    pub fn year_of(&self, now: DateTime<Utc>) -> i32 {
        match self {
            Self::Local => now.with_timezone(&Local).year(),
            Self::Utc => now.year(),
            Self::Fixed(offset) => now.with_timezone(offset).year(),
        }
    }
}

impl fmt::Display for ParseZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Error returned when a zone name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timezone {0:?} (expected \"local\", \"utc\" or an offset like \"+02:00\")")]
pub struct ParseZoneError(String);

impl FromStr for ParseZone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "gmt" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| ParseZoneError(s.to_string()))
    }
}

impl TryFrom<String> for ParseZone {
    type Error = ParseZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParseZone> for String {
    fn from(zone: ParseZone) -> Self {
        zone.to_string()
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM` or `-HHMM` into a fixed offset.
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let caps = OFFSET_REGEX.captures(s)?;
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps[3].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    if &caps[1] == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}
