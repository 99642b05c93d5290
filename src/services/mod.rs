//! Service layer for the crawler.
//!
//! This module contains the business logic for:
//! - Listing page extraction (`listing`)
//! - Post page extraction (`detail`)
//! - Board access and post hydration (`PttCrawler`)
//! - Lazy page-crossing iteration (`ArticleIterator`)
//! - Cancellable streaming (`ArticleStream`)

mod crawler;
pub mod detail;
mod iterator;
pub mod listing;
mod stream;

pub use crawler::PttCrawler;
pub use iterator::ArticleIterator;
pub use stream::ArticleStream;
