//! Client error types.

use std::fmt;

use jamcal_core::{FormatError, PageError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// The date range could not be parsed.
    Format(FormatError),
    /// The page could not be scraped.
    Page(PageError),
    /// The page has no date element.
    NoDateRange,
    /// Action failed (open, save, etc).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Format(err) => write!(f, "failed to parse jam dates: {}", err),
            Self::Page(err) => write!(f, "failed to read page: {}", err),
            Self::NoDateRange => write!(f, "no date range element found on the page"),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Page(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FormatError> for ClientError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

impl From<PageError> for ClientError {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn format_error_message_and_source() {
        let err = ClientError::from(FormatError::RangeNotFound);
        assert_eq!(
            err.to_string(),
            "failed to parse jam dates: date range not found in string"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn no_date_range_has_no_source() {
        assert!(ClientError::NoDateRange.source().is_none());
    }
}
