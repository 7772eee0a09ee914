//! Turning a jam page into a set of "Add to calendar" buttons.
//!
//! [`augment`] is the single entry point: it parses the page's date range,
//! builds the [`EventPayload`] and one [`CalendarButton`] per
//! [`CalendarTarget`]. Either every button is produced or none is.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::FormatError;
use crate::event::{DEFAULT_LOCATION, EventPayload};
use crate::ics::CalendarFile;
use crate::links::{CalendarLinkBuilder, CalendarTarget};
use crate::page::JamPage;
use crate::parse::DateRangeParser;

/// Default description template; `{url}` is replaced by the page location.
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = "Game jam from {url}";

/// What pressing a button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Open this URL in a new browsing context.
    Open { url: Url },
    /// Offer this file for download.
    Download { file: CalendarFile },
}

/// One "Add to calendar" button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarButton {
    pub target: CalendarTarget,
    pub label: String,
    pub action: ButtonAction,
}

impl CalendarButton {
    /// Returns the URL this button opens, if it opens one.
    pub fn url(&self) -> Option<&Url> {
        match &self.action {
            ButtonAction::Open { url } => Some(url),
            ButtonAction::Download { .. } => None,
        }
    }

    /// Returns the file this button downloads, if it downloads one.
    pub fn file(&self) -> Option<&CalendarFile> {
        match &self.action {
            ButtonAction::Download { file } => Some(file),
            ButtonAction::Open { .. } => None,
        }
    }
}

/// Fixed event fields that do not come from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDefaults {
    /// Location written into every event.
    pub location: String,
    /// Description template; `{url}` expands to the page origin and path.
    pub description_template: String,
}

impl Default for EventDefaults {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            description_template: DEFAULT_DESCRIPTION_TEMPLATE.to_string(),
        }
    }
}

impl EventDefaults {
    /// Expands the description template for `page`.
    pub fn description_for(&self, page: &JamPage) -> String {
        let location = page.page_location().unwrap_or_default();
        self.description_template.replace("{url}", &location)
    }
}

/// The event and the buttons built for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Augmentation {
    pub payload: EventPayload,
    pub buttons: Vec<CalendarButton>,
}

impl Augmentation {
    /// Builds every button for `payload`.
    pub fn for_payload(payload: EventPayload, links: &CalendarLinkBuilder) -> Self {
        let buttons = CalendarTarget::ALL
            .iter()
            .map(|&target| {
                let action = match target {
                    CalendarTarget::Google => ButtonAction::Open {
                        url: links.google_url(&payload),
                    },
                    CalendarTarget::Outlook => ButtonAction::Open {
                        url: links.outlook_url(&payload),
                    },
                    CalendarTarget::IcsFile => ButtonAction::Download {
                        file: links.calendar_file(&payload),
                    },
                };
                CalendarButton {
                    target,
                    label: target.label().to_string(),
                    action,
                }
            })
            .collect();

        Self { payload, buttons }
    }

    /// Returns the button for `target`.
    pub fn button(&self, target: CalendarTarget) -> Option<&CalendarButton> {
        self.buttons.iter().find(|b| b.target == target)
    }
}

/// Builds the calendar buttons for a jam page.
///
/// Returns `Ok(None)` when the page has no date element; there is nothing to
/// augment.
///
/// # Errors
///
/// Returns a [`FormatError`] when the date text cannot be parsed. No buttons
/// are produced in that case.
pub fn augment(
    page: &JamPage,
    parser: &DateRangeParser,
    links: &CalendarLinkBuilder,
    defaults: &EventDefaults,
) -> Result<Option<Augmentation>, FormatError> {
    let Some(text) = page.date_text.as_deref() else {
        debug!("page has no date element, skipping");
        return Ok(None);
    };

    let range = parser.parse(text)?;
    let payload = EventPayload::from_range(page.event_title(), range)
        .with_description(defaults.description_for(page))
        .with_location(defaults.location.as_str());

    debug!(
        title = payload.title(),
        start = %payload.start(),
        end = %payload.end(),
        "built event payload"
    );

    Ok(Some(Augmentation::for_payload(payload, links)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ParseZone;
    use chrono::{TimeZone, Utc};

    fn parser() -> DateRangeParser {
        DateRangeParser::new(ParseZone::Utc).with_reference_year(2025)
    }

    fn jam_page() -> JamPage {
        JamPage::from_text("Jam runs from January 1st at 10:00 AM to January 3rd at 5:00 PM")
            .with_title("Winter Jam")
            .with_document_title("Winter Jam - itch.io")
            .with_page_url(Url::parse("https://itch.io/jam/winter-jam?x=1").unwrap())
    }

    fn run(page: &JamPage) -> Result<Option<Augmentation>, FormatError> {
        augment(
            page,
            &parser(),
            &CalendarLinkBuilder::new(),
            &EventDefaults::default(),
        )
    }

    #[test]
    fn builds_payload_from_page() {
        let aug = run(&jam_page()).unwrap().unwrap();
        let p = &aug.payload;
        assert_eq!(p.title(), "Winter Jam");
        assert_eq!(p.description(), "Game jam from https://itch.io/jam/winter-jam");
        assert_eq!(p.location(), "Online");
        assert_eq!(p.start(), Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(p.end(), Utc.with_ymd_and_hms(2025, 1, 3, 17, 0, 0).unwrap());
    }

    #[test]
    fn builds_three_buttons_in_order() {
        let aug = run(&jam_page()).unwrap().unwrap();
        let targets: Vec<CalendarTarget> = aug.buttons.iter().map(|b| b.target).collect();
        assert_eq!(targets, CalendarTarget::ALL);

        let google = aug.button(CalendarTarget::Google).unwrap();
        assert_eq!(google.label, "🗓 Google Calendar");
        assert_eq!(google.url().unwrap().host_str(), Some("calendar.google.com"));
        assert!(google.file().is_none());

        let outlook = aug.button(CalendarTarget::Outlook).unwrap();
        assert_eq!(outlook.url().unwrap().host_str(), Some("outlook.live.com"));

        let ics = aug.button(CalendarTarget::IcsFile).unwrap();
        assert!(ics.url().is_none());
        assert_eq!(ics.file().unwrap().filename, "Winter Jam.ics");
    }

    #[test]
    fn no_date_element_is_not_an_error() {
        let page = JamPage::default().with_document_title("Empty");
        assert_eq!(run(&page), Ok(None));
    }

    #[test]
    fn parse_failure_produces_no_buttons() {
        let page = JamPage::from_text("Jam runs all year long");
        assert_eq!(run(&page), Err(FormatError::RangeNotFound));

        let page = JamPage::from_text("from tomorrow-ish to later");
        assert!(matches!(run(&page), Err(FormatError::InvalidDate(_))));
    }

    #[test]
    fn title_falls_back_to_document_title() {
        let mut page = jam_page();
        page.title = None;
        let aug = run(&page).unwrap().unwrap();
        assert_eq!(aug.payload.title(), "Winter Jam - itch.io");
    }

    #[test]
    fn custom_defaults() {
        let defaults = EventDefaults {
            location: "Discord".to_string(),
            description_template: "See {url} for rules".to_string(),
        };
        let aug = augment(&jam_page(), &parser(), &CalendarLinkBuilder::new(), &defaults)
            .unwrap()
            .unwrap();
        assert_eq!(aug.payload.location(), "Discord");
        assert_eq!(
            aug.payload.description(),
            "See https://itch.io/jam/winter-jam for rules"
        );
    }

    #[test]
    fn description_without_page_url() {
        let page = JamPage::from_text("from May 1 to May 2");
        assert_eq!(EventDefaults::default().description_for(&page), "Game jam from ");
    }
}
