// src/services/listing.rs

//! Listing page extraction.
//!
//! Turns one board index page into an `ArticleList`. Missing fields never
//! fail the page: rows without a usable title link (deleted posts) are
//! skipped and other fields fall back to empty values.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::models::{Article, ArticleList, MAX_POPULARITY};
use crate::utils::{SiteUrls, element_text, extract_article_id, extract_page_index, selector};

const PREVIOUS_LABEL: &str = "上頁";
const NEXT_LABEL: &str = "下頁";
const EXPLOSIVE_MARK: &str = "爆";
const SEPARATOR_CLASS: &str = "r-list-sep";

static ACTION_LINK: LazyLock<Selector> = LazyLock::new(|| selector(".action-bar a"));
static ENTRY: LazyLock<Selector> = LazyLock::new(|| selector(".r-ent"));
static NREC: LazyLock<Selector> = LazyLock::new(|| selector(".nrec"));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector(".date"));
static AUTHOR: LazyLock<Selector> = LazyLock::new(|| selector(".author"));
static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| selector(".title > a"));

/// Parse a listing page of `board`.
pub fn parse_listing(document: &Html, urls: &SiteUrls, board: &str) -> ArticleList {
    let mut list = ArticleList::new(board);
    list.previous_page = page_cursor(document, board, PREVIOUS_LABEL);
    list.next_page = page_cursor(document, board, NEXT_LABEL);

    // Entries after the separator are pinned posts; once seen it stays set.
    let mut suppressed = false;
    for entry in document.select(&ENTRY) {
        suppressed = suppressed || follows_separator(&entry);

        if let Some(article) = parse_entry(&entry, urls, board) {
            if !suppressed {
                list.articles.push(article);
            }
        }
    }

    log::debug!(
        "Parsed {} articles from {} (prev={}, next={})",
        list.articles.len(),
        board,
        list.previous_page,
        list.next_page
    );
    list
}

/// Popularity from the `.nrec` text of a listing entry.
pub fn parse_popularity(text: &str) -> i32 {
    let text = text.trim();
    if text == EXPLOSIVE_MARK {
        MAX_POPULARITY
    } else {
        text.parse().unwrap_or(0)
    }
}

fn page_cursor(document: &Html, board: &str, label: &str) -> u32 {
    document
        .select(&ACTION_LINK)
        .find(|link| link.text().any(|t| t.contains(label)))
        .and_then(|link| link.value().attr("href"))
        .map_or(0, |href| extract_page_index(board, href))
}

fn follows_separator(entry: &ElementRef) -> bool {
    entry
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .is_some_and(|prev| prev.value().classes().any(|c| c == SEPARATOR_CLASS))
}

fn parse_entry(entry: &ElementRef, urls: &SiteUrls, board: &str) -> Option<Article> {
    let link = entry.select(&TITLE_LINK).next()?;
    let href = link.value().attr("href")?;
    let id = extract_article_id(board, href)?;

    let text_of = |sel: &Selector| {
        entry
            .select(sel)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default()
    };

    Some(Article {
        url: urls.article_url(board, &id),
        id,
        board: board.to_string(),
        title: element_text(&link),
        author: text_of(&AUTHOR),
        date_time: text_of(&DATE),
        popularity: parse_popularity(&text_of(&NREC)),
        ..Article::default()
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Listing page markup as served by the board front-end.

    pub struct Entry<'a> {
        pub id: &'a str,
        pub title: &'a str,
        pub author: &'a str,
        pub date: &'a str,
        pub nrec: &'a str,
    }

    impl<'a> Entry<'a> {
        pub fn new(id: &'a str) -> Self {
            Self {
                id,
                title: "[問題] 測試標題",
                author: "tester",
                date: " 1/02",
                nrec: "",
            }
        }
    }

    pub fn entry_html(board: &str, entry: &Entry) -> String {
        format!(
            r#"<div class="r-ent">
                <div class="nrec"><span class="hl f3">{nrec}</span></div>
                <div class="title"><a href="/bbs/{board}/{id}.html">{title}</a></div>
                <div class="meta"><div class="author">{author}</div><div class="date">{date}</div></div>
            </div>"#,
            nrec = entry.nrec,
            board = board,
            id = entry.id,
            title = entry.title,
            author = entry.author,
            date = entry.date,
        )
    }

    pub fn deleted_entry_html() -> String {
        r#"<div class="r-ent">
            <div class="nrec"></div>
            <div class="title">(本文已被刪除) [someone]</div>
            <div class="meta"><div class="author">-</div><div class="date"> 1/02</div></div>
        </div>"#
            .to_string()
    }

    pub fn separator_html() -> String {
        r#"<div class="r-list-sep"></div>"#.to_string()
    }

    /// Wrap rows into a full listing page with navigation links.
    pub fn listing_page(board: &str, prev: Option<u32>, next: Option<u32>, rows: &[String]) -> String {
        let prev_link = match prev {
            Some(p) => format!(r#"<a class="btn wide" href="/bbs/{board}/index{p}.html">&lsaquo; 上頁</a>"#),
            None => r#"<a class="btn wide disabled">&lsaquo; 上頁</a>"#.to_string(),
        };
        let next_link = match next {
            Some(n) => format!(r#"<a class="btn wide" href="/bbs/{board}/index{n}.html">下頁 &rsaquo;</a>"#),
            None => r#"<a class="btn wide disabled">下頁 &rsaquo;</a>"#.to_string(),
        };
        format!(
            r#"<html><head><title>看板 {board} 文章列表 - 批踢踢實業坊</title></head><body>
            <div class="action-bar"><div class="btn-group btn-group-paging">
                <a class="btn wide" href="/bbs/{board}/index1.html">最舊</a>
                {prev_link}
                {next_link}
                <a class="btn wide" href="/bbs/{board}/index.html">最新</a>
            </div></div>
            <div class="r-list-container action-bar-margin bbs-screen">{rows}</div>
            </body></html>"#,
            rows = rows.join("\n"),
        )
    }
}
