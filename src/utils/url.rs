// src/utils/url.rs

//! Board URL construction and parsing.

use regex::Regex;
use url::Url;

use crate::error::Result;

/// Builds listing and article URLs under a board root.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    /// Create from a board root such as `https://www.ptt.cc/bbs/`.
    ///
    /// A root given without the trailing `/` is treated as a directory.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Listing page URL. Page `0` is the newest page (`index.html`).
    pub fn listing_url(&self, board: &str, page: u32) -> String {
        if page == 0 {
            format!("{}{}/index.html", self.base, board)
        } else {
            format!("{}{}/index{}.html", self.base, board, page)
        }
    }

    /// Canonical permalink of an article.
    pub fn article_url(&self, board: &str, id: &str) -> String {
        format!("{}{}/{}.html", self.base, board, id)
    }
}

/// Extract the page index from a listing href, 0 when it has none.
pub fn extract_page_index(board: &str, href: &str) -> u32 {
    let pattern = format!(r"/bbs/{}/index(\d+)\.html$", regex::escape(board));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(href))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Extract the article ID from an article href.
pub fn extract_article_id(board: &str, href: &str) -> Option<String> {
    let pattern = format!(r"/bbs/{}/(.+)\.html$", regex::escape(board));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(href)?;
    caps.get(1).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> SiteUrls {
        SiteUrls::new("https://www.ptt.cc/bbs/").unwrap()
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(
            urls().listing_url("Beauty", 0),
            "https://www.ptt.cc/bbs/Beauty/index.html"
        );
        assert_eq!(
            urls().listing_url("Beauty", 3999),
            "https://www.ptt.cc/bbs/Beauty/index3999.html"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let urls = SiteUrls::new("https://www.ptt.cc/bbs").unwrap();
        assert_eq!(
            urls.listing_url("Beauty", 0),
            "https://www.ptt.cc/bbs/Beauty/index.html"
        );
        assert_eq!(
            urls.article_url("Beauty", "M.1.A.1"),
            "https://www.ptt.cc/bbs/Beauty/M.1.A.1.html"
        );
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(SiteUrls::new("not a url").is_err());
    }

    #[test]
    fn test_article_url() {
        assert_eq!(
            urls().article_url("movie", "M.1700000000.A.1B2"),
            "https://www.ptt.cc/bbs/movie/M.1700000000.A.1B2.html"
        );
    }

    #[test]
    fn test_extract_page_index() {
        assert_eq!(extract_page_index("Beauty", "/bbs/Beauty/index3999.html"), 3999);
        assert_eq!(extract_page_index("Beauty", "/bbs/Beauty/index.html"), 0);
        assert_eq!(extract_page_index("Beauty", "/bbs/Other/index12.html"), 0);
        assert_eq!(extract_page_index("Beauty", ""), 0);
    }

    #[test]
    fn test_extract_article_id() {
        assert_eq!(
            extract_article_id("Beauty", "/bbs/Beauty/M.1700000000.A.1B2.html"),
            Some("M.1700000000.A.1B2".to_string())
        );
        assert_eq!(extract_article_id("Beauty", "/bbs/movie/M.1.A.1.html"), None);
        assert_eq!(extract_article_id("Beauty", "/bbs/Beauty/"), None);
    }
}
