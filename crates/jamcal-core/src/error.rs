//! Error types for date-range parsing and page scraping.

use thiserror::Error;

/// Errors raised while turning jam-page text into timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The text has no `from <date> to <date>` phrase.
    #[error("date range not found in string")]
    RangeNotFound,

    /// One side of the range could not be turned into a timestamp.
    #[error("invalid date format: {0:?}")]
    InvalidDate(String),
}

impl FormatError {
    /// Creates an [`FormatError::InvalidDate`] for the given text.
    pub fn invalid_date(text: impl Into<String>) -> Self {
        Self::InvalidDate(text.into())
    }
}

/// Errors raised while reading a jam page from HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A CSS selector from the configuration did not parse.
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
