//! Calendar-file (`.ics`) generation.
//!
//! The body is a fixed preamble, one `VEVENT` and a fixed postamble, joined
//! with `\n`. Text fields are written verbatim: commas, semicolons and
//! newlines are not escaped, so such input yields a non-conformant file.

use serde::{Deserialize, Serialize};

use crate::event::EventPayload;
use crate::time::stamp;

/// MIME type the file is offered with.
pub const ICS_MIME_TYPE: &str = "text/plain";

/// Placeholder UID written into every event.
pub const PLACEHOLDER_UID: &str = "@Default";

const PREAMBLE: &[&str] = &[
    "BEGIN:VCALENDAR",
    "VERSION:2.0",
    "PRODID:Calendar",
    "CALSCALE:GREGORIAN",
    "METHOD:PUBLISH",
    "BEGIN:VTIMEZONE",
    "END:VTIMEZONE",
];

const POSTAMBLE: &[&str] = &["END:VCALENDAR"];

/// A calendar file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFile {
    /// Suggested file name, `<title>.ics`.
    pub filename: String,
    /// MIME type of the body.
    pub mime_type: String,
    /// The calendar text.
    pub body: String,
}

impl CalendarFile {
    /// Builds the file for `payload`.
    pub fn for_event(payload: &EventPayload) -> Self {
        Self {
            filename: format!("{}.ics", payload.title()),
            mime_type: ICS_MIME_TYPE.to_string(),
            body: ics_body(payload),
        }
    }

    /// Returns a `data:` URL carrying the percent-encoded body.
    ///
    /// The encoding matches `encodeURIComponent`: `!'()*` stay literal.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};charset=utf-8,{}",
            self.mime_type,
            encode_uri_component(&self.body)
        )
    }
}

/// Characters `encodeURIComponent` leaves alone but `urlencoding` escapes.
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

fn encode_uri_component(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escaped, mark) in URI_COMPONENT_MARKS {
        encoded = encoded.replace(escaped, mark);
    }
    encoded
}

/// Renders the calendar text for `payload`.
pub fn ics_body(payload: &EventPayload) -> String {
    let event = [
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", payload.title()),
        format!("UID:{}", PLACEHOLDER_UID),
        "SEQUENCE:0".to_string(),
        "STATUS:CONFIRMED".to_string(),
        "TRANSP:TRANSPARENT".to_string(),
        format!("DTSTART:{}", stamp(&payload.start())),
        format!("DTEND:{}", stamp(&payload.end())),
        format!("LOCATION:{}", payload.location()),
        format!("DESCRIPTION:{}", payload.description()),
        "END:VEVENT".to_string(),
    ];

    let mut body = String::new();
    for line in PREAMBLE.iter().copied() {
        body.push_str(line);
        body.push('\n');
    }
    for line in &event {
        body.push_str(line);
        body.push('\n');
    }
    for line in POSTAMBLE.iter().copied() {
        body.push_str(line);
        body.push('\n');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn payload() -> EventPayload {
        EventPayload::new(
            "Winter Jam",
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 3, 17, 0, 0).unwrap(),
        )
        .with_description("Game jam from https://itch.io/jam/winter-jam")
    }

    #[test]
    fn body_snapshot() {
        insta::assert_snapshot!("winter_jam_ics", ics_body(&payload()).trim_end());
    }

    #[test]
    fn framed_by_a_single_calendar() {
        let body = ics_body(&payload());
        assert!(body.starts_with("BEGIN:VCALENDAR"));
        assert!(body.trim_end().ends_with("END:VCALENDAR"));
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 1);
        assert_eq!(body.matches("END:VEVENT").count(), 1);
        assert!(body.find("BEGIN:VEVENT") < body.find("END:VEVENT"));
    }

    #[test]
    fn uses_stripped_timestamps() {
        let body = ics_body(&payload());
        assert!(body.contains("\nDTSTART:20250101T100000Z\n"));
        assert!(body.contains("\nDTEND:20250103T170000Z\n"));
    }

    #[test]
    fn text_is_not_escaped() {
        let p = payload().with_location("Room 1, Floor 2; East");
        let body = ics_body(&p);
        assert!(body.contains("\nLOCATION:Room 1, Floor 2; East\n"));
    }

    #[test]
    fn file_metadata() {
        let file = CalendarFile::for_event(&payload());
        assert_eq!(file.filename, "Winter Jam.ics");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.body, ics_body(&payload()));
    }

    #[test]
    fn data_url_is_percent_encoded() {
        let file = CalendarFile::for_event(&payload());
        let url = file.data_url();
        assert!(url.starts_with("data:text/plain;charset=utf-8,BEGIN%3AVCALENDAR%0AVERSION%3A2.0"));
        assert!(!url.contains('\n'));
        let decoded = urlencoding::decode(url.split_once(',').unwrap().1).unwrap();
        assert_eq!(decoded, file.body);
    }

    #[test]
    fn data_url_keeps_uri_component_marks() {
        let p = EventPayload::new(
            "Ludum Dare (58)! It's *on*",
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 3, 17, 0, 0).unwrap(),
        );
        let url = CalendarFile::for_event(&p).data_url();
        assert!(url.contains("SUMMARY%3ALudum%20Dare%20(58)!%20It's%20*on*%0A"));

        let decoded = urlencoding::decode(url.split_once(',').unwrap().1).unwrap();
        assert_eq!(decoded, ics_body(&p));
    }

    #[test]
    fn literal_percent_sequences_survive() {
        assert_eq!(encode_uri_component("100%21"), "100%2521");
        assert_eq!(encode_uri_component("a b/c"), "a%20b%2Fc");
    }
}
