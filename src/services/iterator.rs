// src/services/iterator.rs

//! Pagination-aware article iterator.
//!
//! Walks the articles of a listing page and, once they run out, replaces the
//! list with the page behind its "上頁" link. Boards are read newest page
//! first, so crossing always goes toward `previous_page`.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleList};
use crate::services::PttCrawler;

#[derive(Debug, Clone)]
enum State {
    Ready,
    Empty,
    Failed(Arc<AppError>),
}

/// Lazy cursor over a board, crossing pages backward.
pub struct ArticleIterator {
    crawler: PttCrawler,
    list: ArticleList,
    index: usize,
    state: State,
}

impl ArticleIterator {
    pub fn new(crawler: PttCrawler, list: ArticleList) -> Self {
        Self {
            crawler,
            list,
            index: 0,
            state: State::Ready,
        }
    }

    /// The listing page currently being walked.
    pub fn current_list(&self) -> &ArticleList {
        &self.list
    }

    /// Yield the next article, fetching older pages as needed.
    ///
    /// Returns `AppError::EmptyList` once there is nothing left and
    /// `AppError::IteratorFailed` after a page fetch error; both are terminal.
    pub async fn next(&mut self) -> Result<Article> {
        loop {
            match &self.state {
                State::Ready => {}
                State::Empty => return Err(AppError::EmptyList),
                State::Failed(e) => return Err(AppError::IteratorFailed(Arc::clone(e))),
            }

            if let Some(article) = self.list.articles.get(self.index) {
                self.index += 1;
                return Ok(article.clone());
            }

            // Exhausted. An empty first page or a missing link ends the walk;
            // refetching page 0 would restart from the newest page.
            if self.index == 0 || !self.list.has_previous_page() {
                self.state = State::Empty;
                continue;
            }

            log::debug!(
                "Crossing {} to previous page {}",
                self.list.board,
                self.list.previous_page
            );
            match self.crawler.previous_page(&self.list).await {
                Ok(list) => {
                    self.list = list;
                    self.index = 0;
                    if self.list.is_empty() {
                        self.state = State::Empty;
                    }
                }
                Err(e) => self.state = State::Failed(Arc::new(e)),
            }
        }
    }
}
