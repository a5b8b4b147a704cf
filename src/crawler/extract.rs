//! Listing page extraction
//!
//! This module pulls structured records out of the listing markup. The
//! selectors come from configuration (see [`SelectorConfig`]) so the
//! extractor can be pointed at synthetic fixtures, and a site layout change
//! is a config edit rather than a code change.

use crate::config::SelectorConfig;
use crate::listing::Listing;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Pattern capturing the hyphenated model segment of a listing href,
/// e.g. `audi-a4` out of `/cars/used/sale/audi-a4/1115/`
const CATEGORY_PATTERN: &str = r"/(\w+-\w+)/";

/// Errors raised while interpreting listing markup
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid {field} selector {selector:?}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },

    #[error("invalid category pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("pagination control not found in listing markup; the site layout may have changed")]
    PageCountMissing,

    #[error("pagination control text {text:?} is not a page number")]
    PageCountUnparseable { text: String },
}

/// Extracts listing records and pagination facts from page markup
pub struct PageExtractor {
    item: Selector,
    title: Selector,
    price: Selector,
    year: Selector,
    mileage: Selector,
    pages: Selector,
    category_re: Regex,
}

impl PageExtractor {
    /// Compiles the configured selectors into an extractor
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            item: compile("item", &selectors.item)?,
            title: compile("title", &selectors.title)?,
            price: compile("price", &selectors.price)?,
            year: compile("year", &selectors.year)?,
            mileage: compile("mileage", &selectors.mileage)?,
            pages: compile("pages", &selectors.pages)?,
            category_re: Regex::new(CATEGORY_PATTERN)?,
        })
    }

    /// Extracts one record per item block, in document order
    ///
    /// Every matched block yields a record; a sub-field whose element is
    /// absent comes back as an empty string rather than failing the page.
    pub fn extract(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .map(|item| self.extract_item(item))
            .collect()
    }

    /// Number of item blocks on a page
    pub fn items_per_page(&self, html: &str) -> usize {
        Html::parse_document(html).select(&self.item).count()
    }

    /// Total page count, parsed from the "last page" button of the
    /// pagination control
    ///
    /// A missing control or non-numeric button text is a structural parse
    /// failure: it means the markup contract no longer holds, and silently
    /// scraping a single page would hide that.
    pub fn page_count(&self, html: &str) -> Result<u32, ExtractError> {
        let document = Html::parse_document(html);

        let text = document
            .select(&self.pages)
            .next()
            .map(element_text)
            .ok_or(ExtractError::PageCountMissing)?;

        text.parse()
            .map_err(|_| ExtractError::PageCountUnparseable { text })
    }

    fn extract_item(&self, item: ElementRef<'_>) -> Listing {
        let link = item.select(&self.title).next();

        let title = link.map(element_text).unwrap_or_default();
        let href = link
            .and_then(|el| el.value().attr("href"))
            .unwrap_or_default();

        let category = self
            .category_re
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Listing {
            title,
            price: self.select_text(item, &self.price),
            year: self.select_text(item, &self.year),
            mileage: self.select_text(item, &self.mileage),
            category,
            url: href.to_string(),
        }
    }

    /// Text of the first match under the item block, or empty string
    fn select_text(&self, item: ElementRef<'_>, selector: &Selector) -> String {
        item.select(selector).next().map(element_text).unwrap_or_default()
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
