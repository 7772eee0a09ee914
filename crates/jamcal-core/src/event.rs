//! The event handed to every calendar builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parse::DateRange;

/// Location used when a page gives none.
pub const DEFAULT_LOCATION: &str = "Online";

/// Everything a calendar service needs to pre-fill one event.
///
/// Fields are read-only once built; the `with_*` methods consume the payload
/// and are meant for construction only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    title: String,
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    location: String,
}

impl EventPayload {
    /// Creates a payload with an empty description and the default location.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            location: DEFAULT_LOCATION.to_string(),
        }
    }

    /// Creates a payload spanning `range`.
    pub fn from_range(title: impl Into<String>, range: DateRange) -> Self {
        Self::new(title, range.start, range.end)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn defaults() {
        let payload = EventPayload::new("Jam", utc(2025, 1, 1, 10), utc(2025, 1, 3, 17));
        assert_eq!(payload.title(), "Jam");
        assert_eq!(payload.description(), "");
        assert_eq!(payload.location(), "Online");
        assert_eq!(payload.start(), utc(2025, 1, 1, 10));
        assert_eq!(payload.end(), utc(2025, 1, 3, 17));
    }

    #[test]
    fn builders() {
        let range = DateRange {
            start: utc(2025, 1, 1, 10),
            end: utc(2025, 1, 3, 17),
        };
        let payload = EventPayload::from_range("Jam", range)
            .with_description("Game jam from https://itch.io/jam/x")
            .with_location("Berlin");
        assert_eq!(payload.description(), "Game jam from https://itch.io/jam/x");
        assert_eq!(payload.location(), "Berlin");
        assert_eq!(payload.start(), range.start);
    }

    #[test]
    fn serde_roundtrip() {
        let payload = EventPayload::new("Jam", utc(2025, 1, 1, 10), utc(2025, 1, 3, 17))
            .with_description("desc");
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: EventPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload, parsed);
    }
}
