// src/services/stream.rs

//! Cancellable article stream.
//!
//! A producer task drives an `ArticleIterator` and hands articles to the
//! consumer through a single-slot channel. The producer reserves the slot
//! before advancing the iterator, so it never runs more than one article
//! ahead of the consumer.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::models::Article;
use crate::services::ArticleIterator;

/// Consumer side of a streamed board walk.
///
/// Dropping the stream cancels the producer.
pub struct ArticleStream {
    rx: mpsc::Receiver<Article>,
    cancel: CancellationToken,
    producer: Option<JoinHandle<Option<AppError>>>,
}

impl ArticleStream {
    /// Start a producer task for `iterator`. Requires a tokio runtime.
    pub fn spawn(iterator: ArticleIterator) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let producer = tokio::spawn(produce(iterator, tx, cancel.clone()));

        Self {
            rx,
            cancel,
            producer: Some(producer),
        }
    }

    /// Receive the next article, `None` once the stream has ended or has
    /// been cancelled through any clone of its token.
    pub async fn recv(&mut self) -> Option<Article> {
        let item = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            item = self.rx.recv() => item,
        };
        if self.cancel.is_cancelled() {
            self.close_and_drain();
            return None;
        }
        item
    }

    /// Ask the producer to stop. No article is delivered afterwards.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.close_and_drain();
    }

    /// Token that stops the producer when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the channel and drop anything already handed over.
    fn close_and_drain(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }

    /// Wait for the producer to exit and report how the walk ended.
    ///
    /// Running out of pages and cancellation are both `Ok`; a page fetch
    /// failure is returned as the error.
    pub async fn finish(mut self) -> Result<()> {
        self.rx.close();
        match self.producer.take() {
            Some(handle) => match handle.await? {
                Some(error) => Err(error),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

impl Stream for ArticleStream {
    type Item = Article;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Article>> {
        if self.cancel.is_cancelled() {
            self.close_and_drain();
            return Poll::Ready(None);
        }
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(_)) if self.cancel.is_cancelled() => {
                self.close_and_drain();
                Poll::Ready(None)
            }
            poll => poll,
        }
    }
}

impl Drop for ArticleStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Producer loop. Returns the error that ended the walk, if any.
async fn produce(
    mut iterator: ArticleIterator,
    tx: mpsc::Sender<Article>,
    cancel: CancellationToken,
) -> Option<AppError> {
    loop {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Article stream cancelled");
                return None;
            }
            permit = tx.reserve() => match permit {
                Ok(permit) => permit,
                Err(_) => {
                    log::debug!("Article stream receiver closed");
                    return None;
                }
            },
        };

        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Article stream cancelled");
                return None;
            }
            next = iterator.next() => next,
        };

        match next {
            Ok(article) => permit.send(article),
            Err(AppError::EmptyList) => {
                log::debug!("Article stream reached the last page");
                return None;
            }
            Err(error) => {
                log::warn!("Article stream stopped: {}", error);
                return Some(error);
            }
        }
    }
}
