//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use self::url::{SiteUrls, extract_article_id, extract_page_index};

/// Concatenated text of an element, trimmed.
pub fn element_text(element: &scraper::ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a CSS selector that is known at compile time.
pub(crate) fn selector(s: &'static str) -> scraper::Selector {
    match scraper::Selector::parse(s) {
        Ok(sel) => sel,
        Err(e) => panic!("invalid built-in selector '{s}': {e:?}"),
    }
}

/// Compile a regular expression that is known at compile time.
pub(crate) fn pattern(s: &'static str) -> regex::Regex {
    match regex::Regex::new(s) {
        Ok(re) => re,
        Err(e) => panic!("invalid built-in regex '{s}': {e}"),
    }
}
