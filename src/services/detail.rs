// src/services/detail.rs

//! Post page extraction.
//!
//! The header block, the board-name block and the push replies are detached
//! from the working tree before the body is captured, so `content` and the
//! link/image lists only cover what the author wrote.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::Article;
use crate::utils::{SiteUrls, element_text, pattern, selector};

const PUSH_MARK: &str = "推";
const BOO_MARK: &str = "噓";

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_VALUE: LazyLock<Selector> =
    LazyLock::new(|| selector(".article-metaline .article-meta-value"));
static META_LINE: LazyLock<Selector> = LazyLock::new(|| selector(".article-metaline"));
static META_LINE_RIGHT: LazyLock<Selector> = LazyLock::new(|| selector(".article-metaline-right"));
static PUSH: LazyLock<Selector> = LazyLock::new(|| selector(".push"));
static PUSH_TAG: LazyLock<Selector> = LazyLock::new(|| selector(".push .push-tag"));
static MAIN_CONTENT: LazyLock<Selector> = LazyLock::new(|| selector("#main-content"));
static BODY_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("#main-content img"));
static BODY_LINK: LazyLock<Selector> = LazyLock::new(|| selector("#main-content a"));

static NICKNAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(.*)\s+\(.*\)"));

/// Parse a post page. The document is stripped in place.
pub fn parse_detail(document: &mut Html, urls: &SiteUrls, board: &str, id: &str) -> Article {
    let title = document
        .select(&TITLE)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default();

    // Header values come in order: author, title or board, time.
    let mut author = String::new();
    let mut date_time = String::new();
    for (i, value) in document.select(&META_VALUE).take(3).enumerate() {
        match i {
            0 => author = strip_nickname(&value.text().collect::<String>()),
            2 => date_time = element_text(&value),
            _ => {}
        }
    }

    let popularity = count_popularity(document);
    strip_decorations(document);

    let content = document
        .select(&MAIN_CONTENT)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default();

    Article {
        id: id.to_string(),
        board: board.to_string(),
        title,
        author,
        date_time,
        popularity,
        url: urls.article_url(board, id),
        content,
        hydrated: None,
    }
}

/// Pushes minus boos, never below zero.
pub fn count_popularity(document: &Html) -> i32 {
    let (pushes, boos) = document
        .select(&PUSH_TAG)
        .fold((0i32, 0i32), |(p, b), tag| match element_text(&tag).as_str() {
            PUSH_MARK => (p + 1, b),
            BOO_MARK => (p, b + 1),
            _ => (p, b),
        });
    (pushes - boos).max(0)
}

/// Detach header lines and push replies from the document.
pub fn strip_decorations(document: &mut Html) {
    let ids: Vec<_> = [&*META_LINE, &*META_LINE_RIGHT, &*PUSH]
        .into_iter()
        .flat_map(|sel| document.select(sel).map(|el| el.id()).collect::<Vec<_>>())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Image sources inside the post body, in document order.
pub fn extract_image_urls(document: &Html) -> Vec<String> {
    collect_attr(document, &BODY_IMAGE, "src")
}

/// Link targets inside the post body, in document order.
pub fn extract_links(document: &Html) -> Vec<String> {
    collect_attr(document, &BODY_LINK, "href")
}

fn collect_attr(document: &Html, sel: &Selector, attr: &str) -> Vec<String> {
    document
        .select(sel)
        .filter_map(|el| el.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"name (nickname)"` becomes `"name"`; anything else is kept as is.
fn strip_nickname(name: &str) -> String {
    NICKNAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |m| m.as_str())
        .trim()
        .to_string()
}
