//! Natural-language date parsing.
//!
//! [`NaturalDateParser`] reads the kind of date strings jam pages print
//! once ordinals and "at" have been cleaned away:
//!
//! - `2025-01-01T10:00:00Z`, `2025-01-01T10:00:00+02:00` (absolute)
//! - `2025-01-01 10:00`, `2025-01-01` (ISO, naive)
//! - `1/15/2025`, `01/15/2025 5:00 PM` (US numeric)
//! - `January 1 10:00 AM`, `Wed, Jan 1, 2025 10:00`, `1 January 2025 17:00`
//!
//! RFC 3339 and ISO input goes through chrono. Everything else is
//! normalised to `M/D/YYYY <time>` and read by [`fuzzydate`], which handles
//! `H:MM`, `H:MM:SS`, `9pm`, `5:00 pm`, `noon` and `midnight`. A trailing
//! zone (`UTC`, `GMT`, `Z`, `+02:00`) overrides the parser's [`ParseZone`];
//! a missing year falls back to the reference year.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use tracing::trace;

use crate::time::{ParseZone, parse_offset};

/// Naive ISO shapes with a time, tried in order.
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

static ZONE_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?P<zone>utc|gmt|z|[+-]\d{2}:?\d{2})$").expect("Invalid zone suffix regex")
});

/// Parses free-text dates into UTC instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalDateParser {
    zone: ParseZone,
    reference_year: Option<i32>,
}

impl NaturalDateParser {
    /// Creates a parser that reads naive dates in `zone`.
    pub fn new(zone: ParseZone) -> Self {
        Self {
            zone,
            reference_year: None,
        }
    }

    /// Sets the year assumed when the input has none.
    ///
    /// Without it, the current year in the parser's zone is used.
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Returns the zone naive dates are read in.
    pub fn zone(&self) -> ParseZone {
        self.zone
    }

    /// Returns the configured reference year, if any.
    pub fn reference_year(&self) -> Option<i32> {
        self.reference_year
    }

    /// Parses `input`, returning `None` if it is not a recognised or
    /// representable date.
    pub fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt.with_timezone(&Utc));
        }

        let (text, zone) = split_zone(input)?;
        let naive = parse_iso(text).or_else(|| self.parse_human(text))?;
        zone.unwrap_or(self.zone).resolve(naive)
    }

    fn parse_human(&self, text: &str) -> Option<NaiveDateTime> {
        let mut tokens = tokenize(text);
        if tokens.len() > 1 && is_weekday(&tokens[0]) {
            tokens.remove(0);
        }

        let (date, rest) = self.numeric_date(&tokens)?;
        let query = match clock_text(rest)? {
            Some(time) => format!("{} {}", date, time),
            None => date,
        };

        let parsed = match fuzzydate::parse(query.as_str()) {
            Ok(parsed) => parsed,
            Err(_) => {
                trace!(input = text, query = %query, "fuzzydate rejected date");
                return None;
            }
        };

        if rest.is_empty() {
            Some(parsed.date().and_time(NaiveTime::MIN))
        } else {
            Some(parsed)
        }
    }

    /// Turns the leading date tokens into `M/D/YYYY` and returns the
    /// remaining (time) tokens.
    fn numeric_date<'a>(&self, tokens: &'a [String]) -> Option<(String, &'a [String])> {
        let first = tokens.first()?;
        if first.contains('/') {
            return Some((first.clone(), &tokens[1..]));
        }

        let second = tokens.get(1)?;
        let (month, day) = match month_number(first) {
            Some(month) => (month, second.parse::<u32>().ok()?),
            None => (month_number(second)?, first.parse::<u32>().ok()?),
        };

        let (year, rest) = match tokens.get(2).filter(|t| is_year(t)) {
            Some(year) => (year.parse().ok()?, &tokens[3..]),
            None => (self.fallback_year(), &tokens[2..]),
        };

        NaiveDate::from_ymd_opt(year, month, day)?;
        Some((format!("{}/{}/{}", month, day, year), rest))
    }

    fn fallback_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| self.zone.year_of(Utc::now()))
    }
}

/// Maps a full or three-letter English month name to its number.
pub fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    let lower = name.to_ascii_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|full| *full == lower || (lower.len() == 3 && full.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
}

fn is_weekday(token: &str) -> bool {
    token.len() >= 3 && WEEKDAYS.iter().any(|full| full.starts_with(token))
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}

/// Strips a trailing zone designator.
fn split_zone(input: &str) -> Option<(&str, Option<ParseZone>)> {
    let Some(caps) = ZONE_SUFFIX_REGEX.captures(input) else {
        return Some((input, None));
    };
    let start = caps.get(0)?.start();
    let zone = match caps["zone"].to_ascii_lowercase().as_str() {
        "utc" | "gmt" | "z" => ParseZone::Utc,
        other => ParseZone::Fixed(parse_offset(other)?),
    };
    Some((&input[..start], Some(zone)))
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    ISO_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Lowercases, drops commas and abbreviation dots, folds `a.m.`/`p.m.`.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace("a.m.", "am")
        .replace("p.m.", "pm")
        .replace(',', " ")
        .split_whitespace()
        .map(|token| token.trim_end_matches('.').to_string())
        .collect()
}

/// Checks the time tokens and renders them for fuzzydate.
///
/// `Some(None)` means there is no time; `None` means the time is invalid.
fn clock_text(rest: &[String]) -> Option<Option<String>> {
    match rest {
        [] => return Some(None),
        [word] if word == "noon" || word == "midnight" => return Some(Some(word.clone())),
        // "10" alone is a number, not a time.
        [bare] if bare.chars().all(|c| c.is_ascii_digit()) => return None,
        _ => {}
    }

    let digits: String = rest[0].chars().take_while(|c| c.is_ascii_digit()).collect();
    let hour: u32 = digits.parse().ok()?;
    let has_meridiem = rest
        .last()
        .is_some_and(|t| t.ends_with("am") || t.ends_with("pm"));
    if has_meridiem && !(1..=12).contains(&hour) {
        return None;
    }

    Some(Some(join_meridiem(rest)))
}

/// `9 pm` becomes `9pm`; `5:00 pm` is left alone.
fn join_meridiem(rest: &[String]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(rest.len());
    for token in rest {
        match out.last_mut() {
            Some(prev)
                if (token == "am" || token == "pm")
                    && prev.chars().all(|c| c.is_ascii_digit()) =>
            {
                prev.push_str(token);
            }
            _ => out.push(token.clone()),
        }
    }
    out.join(" ")
}
