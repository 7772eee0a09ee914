//! Reading the bits of a jam page the calendar links are built from.
//!
//! Every lookup is optional: a page without a date element produces a
//! [`JamPage`] with `date_text: None`, and a missing title element falls back
//! to the document `<title>`.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::PageError;

/// Default selector of the element holding the `from … to …` sentence.
pub const DEFAULT_DATE_SELECTOR: &str = ".date_data";

/// Default selector of the jam title link.
pub const DEFAULT_TITLE_SELECTOR: &str = ".jam_title_header a";

/// CSS selectors used to scrape a jam page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Element whose text holds the date range.
    pub date: String,
    /// Element whose text is the jam title.
    pub title: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_SELECTOR.to_string(),
            title: DEFAULT_TITLE_SELECTOR.to_string(),
        }
    }
}

impl PageSelectors {
    /// Checks that both selectors parse.
    pub fn validate(&self) -> Result<(), PageError> {
        compile(&self.date)?;
        compile(&self.title)?;
        Ok(())
    }
}

/// What was found on a jam page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JamPage {
    /// Trimmed text of the date element, if the page has one.
    pub date_text: Option<String>,
    /// Text of the title element, if the page has one.
    pub title: Option<String>,
    /// The document `<title>`, empty when absent.
    pub document_title: String,
    /// Where the page was loaded from.
    pub page_url: Option<Url>,
}

impl JamPage {
    /// Creates a page holding only a date sentence.
    pub fn from_text(date_text: impl Into<String>) -> Self {
        Self {
            date_text: Some(date_text.into().trim().to_string()),
            ..Self::default()
        }
    }

    /// Sets the title element text.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the document title.
    #[must_use]
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    /// Sets the page URL.
    #[must_use]
    pub fn with_page_url(mut self, url: Url) -> Self {
        self.page_url = Some(url);
        self
    }

    /// Scrapes `html` using `selectors`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidSelector`] if a selector does not parse.
    /// Missing elements are not errors.
    pub fn from_html(
        html: &str,
        page_url: Option<Url>,
        selectors: &PageSelectors,
    ) -> Result<Self, PageError> {
        let date_selector = compile(&selectors.date)?;
        let title_selector = compile(&selectors.title)?;
        let document_title_selector = compile("title")?;

        let document = Html::parse_document(html);

        let date_text = document
            .select(&date_selector)
            .next()
            .map(|el| element_text(el).trim().to_string());
        let title = document
            .select(&title_selector)
            .next()
            .map(|el| element_text(el).trim().to_string());
        let document_title = document
            .select(&document_title_selector)
            .next()
            .map(|el| element_text(el).trim().to_string())
            .unwrap_or_default();

        debug!(
            has_date = date_text.is_some(),
            has_title = title.is_some(),
            "scraped jam page"
        );

        Ok(Self {
            date_text,
            title,
            document_title,
            page_url,
        })
    }

    /// The title to give the event: the title element, else the document title.
    pub fn event_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.document_title)
    }

    /// The page's origin followed by its path, without query or fragment.
    pub fn page_location(&self) -> Option<String> {
        self.page_url
            .as_ref()
            .map(|url| format!("{}{}", url.origin().ascii_serialization(), url.path()))
    }
}

fn compile(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}
