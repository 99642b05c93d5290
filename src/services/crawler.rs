// src/services/crawler.rs

//! Board crawler service.
//!
//! Binds the fetch capability to the listing and detail extractors and
//! exposes the operations callers use: listing pages, post hydration,
//! link/image extraction, iteration and streaming.

use std::sync::Arc;

use scraper::Html;

use crate::error::Result;
use crate::models::{Article, ArticleList, Config, Hydrated};
use crate::services::detail::{extract_image_urls, extract_links, parse_detail, strip_decorations};
use crate::services::listing::parse_listing;
use crate::services::{ArticleIterator, ArticleStream};
use crate::utils::SiteUrls;
use crate::utils::http::{Fetch, HttpFetcher};

/// Service for reading boards and posts.
///
/// Cloning is cheap; clones share the same fetcher.
#[derive(Clone)]
pub struct PttCrawler {
    fetcher: Arc<dyn Fetch>,
    urls: SiteUrls,
    detail_retries: u32,
}

impl PttCrawler {
    /// Create a crawler that talks HTTP according to `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.client)?;
        let mut crawler = Self::with_fetcher(Arc::new(fetcher), &config.client.base_url)?;
        crawler.detail_retries = config.detail.retries;
        Ok(crawler)
    }

    /// Create a crawler on top of any fetch implementation.
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>, base_url: &str) -> Result<Self> {
        Ok(Self {
            fetcher,
            urls: SiteUrls::new(base_url)?,
            detail_retries: 0,
        })
    }

    /// Fetch one listing page. Page `0` is the newest page.
    pub async fn get_articles(&self, board: &str, page: u32) -> Result<ArticleList> {
        let url = self.urls.listing_url(board, page);
        let body = self.fetcher.fetch(&url).await?;
        let document = Html::parse_document(&body);
        Ok(parse_listing(&document, &self.urls, board))
    }

    /// Fetch the page behind the list's "上頁" link.
    pub async fn previous_page(&self, list: &ArticleList) -> Result<ArticleList> {
        self.get_articles(&list.board, list.previous_page).await
    }

    /// Fetch the page behind the list's "下頁" link.
    pub async fn next_page(&self, list: &ArticleList) -> Result<ArticleList> {
        self.get_articles(&list.board, list.next_page).await
    }

    /// Fetch and parse a single post.
    pub async fn load_article(&self, board: &str, id: &str) -> Result<Article> {
        let url = self.urls.article_url(board, id);
        let body = self.fetch_detail(&url).await?;
        Ok(self.hydrate(body, board, id))
    }

    /// Hydrate `article` in place, replacing every field and the cached page.
    ///
    /// On error the article is left untouched.
    pub async fn load(&self, article: &mut Article) -> Result<()> {
        let url = self.urls.article_url(&article.board, &article.id);
        let body = self.fetch_detail(&url).await?;
        *article = self.hydrate(body, &article.board, &article.id);
        Ok(())
    }

    /// Image sources in the post body, fetching the post if not yet cached.
    pub async fn image_urls(&self, article: &mut Article) -> Result<Vec<String>> {
        let document = self.cached_body(article).await?;
        Ok(extract_image_urls(&document))
    }

    /// Link targets in the post body, fetching the post if not yet cached.
    pub async fn links(&self, article: &mut Article) -> Result<Vec<String>> {
        let document = self.cached_body(article).await?;
        Ok(extract_links(&document))
    }

    /// Lazily walk `list` and the pages before it.
    pub fn iter(&self, list: ArticleList) -> ArticleIterator {
        ArticleIterator::new(self.clone(), list)
    }

    /// Stream articles starting at a listing page, crossing pages backward.
    pub async fn stream(&self, board: &str, page: u32) -> Result<ArticleStream> {
        let list = self.get_articles(board, page).await?;
        Ok(ArticleStream::spawn(self.iter(list)))
    }

    fn hydrate(&self, body: String, board: &str, id: &str) -> Article {
        let mut document = Html::parse_document(&body);
        let mut article = parse_detail(&mut document, &self.urls, board, id);
        article.hydrated = Some(Hydrated { document: body });
        article
    }

    /// Stripped post document, from the cache or a fresh fetch.
    async fn cached_body(&self, article: &mut Article) -> Result<Html> {
        if article.hydrated.is_none() {
            let url = self.urls.article_url(&article.board, &article.id);
            let body = self.fetch_detail(&url).await?;
            article.hydrated = Some(Hydrated { document: body });
        }

        let raw = article
            .hydrated
            .as_ref()
            .map(|h| h.document.as_str())
            .unwrap_or_default();
        let mut document = Html::parse_document(raw);
        strip_decorations(&mut document);
        Ok(document)
    }

    async fn fetch_detail(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url).await {
                Err(e) if e.is_transport() && attempt < self.detail_retries => {
                    attempt += 1;
                    log::warn!(
                        "Fetch of {} failed ({}), retry {}/{}",
                        url,
                        e,
                        attempt,
                        self.detail_retries
                    );
                }
                result => return result,
            }
        }
    }
}
