//! Date-range extraction from jam-page sentences.
//!
//! Jam pages announce their schedule in prose, e.g.
//! `"Jam runs from January 1st at 10:00 AM to January 3rd at 5:00 PM"`.
//! [`DateRangeParser`] finds the `from <A> to <B>` phrase, cleans each side
//! and hands it to a [`NaturalDateParser`].
//!
//! # Example
//!
//! ```
//! use jamcal_core::parse::DateRangeParser;
//! use jamcal_core::time::ParseZone;
//!
//! let parser = DateRangeParser::new(ParseZone::Utc).with_reference_year(2025);
//! let range = parser
//!     .parse("Jam runs from January 1st at 10:00 AM to January 3rd at 5:00 PM")
//!     .unwrap();
//! assert_eq!(range.start.to_rfc3339(), "2025-01-01T10:00:00+00:00");
//! assert_eq!(range.end.to_rfc3339(), "2025-01-03T17:00:00+00:00");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::NaturalDateParser;
use crate::error::FormatError;
use crate::time::ParseZone;

/// `from <A> to <B>`: `<A>` is the shortest span, `<B>` runs to the end.
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)from (.+?) to (.+)$").expect("Invalid range regex"));

static ORDINAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(st|nd|rd|th)").expect("Invalid ordinal regex"));

static AT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\sat\s").expect("Invalid 'at' regex"));

/// Start and end of a jam, in UTC.
///
/// No ordering is enforced: `end` may precede `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// When the jam starts.
    pub start: DateTime<Utc>,
    /// When the jam ends.
    pub end: DateTime<Utc>,
}

/// Parses `from <date> to <date>` sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeParser {
    dates: NaturalDateParser,
}

impl DateRangeParser {
    /// Creates a parser reading naive dates in `zone`.
    pub fn new(zone: ParseZone) -> Self {
        Self {
            dates: NaturalDateParser::new(zone),
        }
    }

    /// Creates a parser around an existing date parser.
    pub fn with_date_parser(dates: NaturalDateParser) -> Self {
        Self { dates }
    }

    /// Sets the year assumed for dates written without one.
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.dates = self.dates.with_reference_year(year);
        self
    }

    /// Returns the underlying date parser.
    pub fn date_parser(&self) -> &NaturalDateParser {
        &self.dates
    }

    /// Extracts and parses the date range in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RangeNotFound`] when no `from … to …` phrase is
    /// present, and [`FormatError::InvalidDate`] when either side is not a
    /// usable date.
    pub fn parse(&self, text: &str) -> Result<DateRange, FormatError> {
        let (start_text, end_text) = split_range(text).ok_or(FormatError::RangeNotFound)?;

        let start_clean = clean_date_text(start_text);
        let end_clean = clean_date_text(end_text);
        debug!(start = %start_clean, end = %end_clean, "extracted date range");

        let start = self
            .dates
            .parse(&start_clean)
            .ok_or_else(|| FormatError::invalid_date(start_clean.as_str()))?;
        let end = self
            .dates
            .parse(&end_clean)
            .ok_or_else(|| FormatError::invalid_date(end_clean.as_str()))?;

        Ok(DateRange { start, end })
    }
}

/// Returns the raw `<A>` and `<B>` halves of a `from <A> to <B>` phrase.
pub fn split_range(text: &str) -> Option<(&str, &str)> {
    let caps = RANGE_REGEX.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Strips ordinal suffixes, turns the first `" at "` into a space and trims.
pub fn clean_date_text(text: &str) -> String {
    let without_ordinals = strip_ordinals(text);
    AT_REGEX.replace(&without_ordinals, " ").trim().to_string()
}

/// Drops `st`/`nd`/`rd`/`th` after digits: `"3rd"` becomes `"3"`.
pub fn strip_ordinals(text: &str) -> Cow<'_, str> {
    ORDINAL_REGEX.replace_all(text, "${1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn parser() -> DateRangeParser {
        DateRangeParser::new(ParseZone::Utc).with_reference_year(2025)
    }

    mod range {
        use super::*;

        #[test]
        fn parses_jam_sentence() {
            let range = parser()
                .parse("Jam runs from January 1st at 10:00 AM to January 3rd at 5:00 PM")
                .unwrap();
            assert_eq!(range.start, utc(2025, 1, 1, 10, 0));
            assert_eq!(range.end, utc(2025, 1, 3, 17, 0));
        }

        #[test]
        fn keyword_match_is_case_insensitive() {
            let range = parser()
                .parse("Runs FROM March 2nd 2026 at 9:00 TO March 4th 2026 at 18:30")
                .unwrap();
            assert_eq!(range.start, utc(2026, 3, 2, 9, 0));
            assert_eq!(range.end, utc(2026, 3, 4, 18, 30));
        }

        #[test]
        fn reads_naive_dates_in_parser_zone() {
            let parser = DateRangeParser::new("-05:00".parse().unwrap()).with_reference_year(2025);
            let range = parser
                .parse("from June 1st at 10:00 AM to June 2nd at 10:00 AM")
                .unwrap();
            assert_eq!(range.start, utc(2025, 6, 1, 15, 0));
            assert_eq!(range.end, utc(2025, 6, 2, 15, 0));
        }

        #[test]
        fn iso_dates_as_printed_by_itch() {
            let range = parser()
                .parse("Jam runs from 2025-08-01 20:00:00 to 2025-08-11 20:00:00")
                .unwrap();
            assert_eq!(range.start, utc(2025, 8, 1, 20, 0));
            assert_eq!(range.end, utc(2025, 8, 11, 20, 0));
        }

        #[test]
        fn end_before_start_is_accepted() {
            let range = parser()
                .parse("from January 3rd at 5:00 PM to January 1st at 10:00 AM")
                .unwrap();
            assert!(range.end < range.start);
        }

        #[test]
        fn start_is_shortest_span_before_to() {
            let (start, end) = split_range("from May 1 to May 2 to May 3").unwrap();
            assert_eq!(start, "May 1");
            assert_eq!(end, "May 2 to May 3");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn missing_to_is_range_not_found() {
            assert_eq!(
                parser().parse("Jam runs from January 1st until January 3rd"),
                Err(FormatError::RangeNotFound)
            );
        }

        #[test]
        fn missing_from_is_range_not_found() {
            assert_eq!(
                parser().parse("January 1st to January 3rd"),
                Err(FormatError::RangeNotFound)
            );
            assert_eq!(parser().parse(""), Err(FormatError::RangeNotFound));
        }

        #[test]
        fn unparsable_start_reports_cleaned_text() {
            assert_eq!(
                parser().parse("from sometime soon to January 3rd at 5:00 PM"),
                Err(FormatError::InvalidDate("sometime soon".to_string()))
            );
        }

        #[test]
        fn unparsable_end_reports_cleaned_text() {
            assert_eq!(
                parser().parse("from January 1st to whenever we finish"),
                Err(FormatError::InvalidDate("whenever we finish".to_string()))
            );
        }
    }

    mod cleaning {
        use super::*;

        #[test]
        fn strips_ordinal_suffixes() {
            assert_eq!(strip_ordinals("3rd"), "3");
            assert_eq!(strip_ordinals("22nd"), "22");
            assert_eq!(strip_ordinals("1st and 4th"), "1 and 4");
        }

        #[test]
        fn leaves_plain_numbers_alone() {
            assert_eq!(strip_ordinals("2025 10:00"), "2025 10:00");
            assert_eq!(strip_ordinals("August 5"), "August 5");
        }

        #[test]
        fn collapses_first_at() {
            assert_eq!(clean_date_text(" January 1st at 10:00 AM "), "January 1 10:00 AM");
            assert_eq!(clean_date_text("May 2 AT 9:00"), "May 2 9:00");
        }

        #[test]
        fn at_inside_words_is_kept() {
            assert_eq!(clean_date_text("Saturday May 3"), "Saturday May 3");
        }
    }
}
