//! Article data structures.

use serde::{Deserialize, Serialize};

/// Popularity reported for posts the board marks as "爆".
pub const MAX_POPULARITY: i32 = i32::MAX;

/// A single board post.
///
/// Listing pages only fill the summary fields; `content` and the cached
/// detail page appear after the article is loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Post identifier, unique within a board (e.g. `M.1700000000.A.1B2`)
    pub id: String,

    /// Owning board name
    pub board: String,

    /// Display title
    pub title: String,

    /// Author ID without the nickname suffix
    pub author: String,

    /// Date/time exactly as rendered by the board
    pub date_time: String,

    /// Push count, or `MAX_POPULARITY` for "爆"
    pub popularity: i32,

    /// Canonical permalink
    pub url: String,

    /// Inner HTML of the post body, empty until loaded
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(skip)]
    pub(crate) hydrated: Option<Hydrated>,
}

/// Detail page cached by an article after it has been fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hydrated {
    pub document: String,
}

impl Article {
    /// Whether the detail page has been fetched for this article.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.is_some()
    }

    /// Format article for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{board}`, `{title}`, `{author}`
    /// - `{date}`, `{popularity}`, `{url}`
    pub fn format(&self, template: &str) -> String {
        let popularity = if self.popularity == MAX_POPULARITY {
            "爆".to_string()
        } else {
            self.popularity.to_string()
        };

        template
            .replace("{id}", &self.id)
            .replace("{board}", &self.board)
            .replace("{title}", &self.title)
            .replace("{author}", &self.author)
            .replace("{date}", &self.date_time)
            .replace("{popularity}", &popularity)
            .replace("{url}", &self.url)
    }
}

/// One listing page of a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleList {
    /// Board name
    pub board: String,

    /// Articles in listing order
    pub articles: Vec<Article>,

    /// Index of the page behind the "上頁" link, 0 when absent
    pub previous_page: u32,

    /// Index of the page behind the "下頁" link, 0 when absent
    pub next_page: u32,
}

impl ArticleList {
    /// Create an empty list for a board.
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn has_previous_page(&self) -> bool {
        self.previous_page != 0
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: "M.1700000000.A.1B2".to_string(),
            board: "Beauty".to_string(),
            title: "[正妹] 測試".to_string(),
            author: "tester".to_string(),
            date_time: "11/15".to_string(),
            popularity: 12,
            url: "https://www.ptt.cc/bbs/Beauty/M.1700000000.A.1B2.html".to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn test_format() {
        let article = sample_article();
        let result = article.format("[{board}] {title} ({popularity})");
        assert_eq!(result, "[Beauty] [正妹] 測試 (12)");
    }

    #[test]
    fn test_format_explosive() {
        let mut article = sample_article();
        article.popularity = MAX_POPULARITY;
        assert_eq!(article.format("{popularity}"), "爆");
    }

    #[test]
    fn test_serialize_skips_cache() {
        let mut article = sample_article();
        article.hydrated = Some(Hydrated {
            document: "<html></html>".to_string(),
        });

        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("hydrated").is_none());
        assert!(json.get("content").is_none());
        assert_eq!(json["popularity"], 12);
    }

    #[test]
    fn test_page_cursors() {
        let mut list = ArticleList::new("Beauty");
        assert!(list.is_empty());
        assert!(!list.has_previous_page());

        list.previous_page = 3999;
        assert!(list.has_previous_page());
        assert!(!list.has_next_page());
    }
}
