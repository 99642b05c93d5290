// src/lib.rs

//! PTT Crawler Library
//!
//! Reads board listings, walks them page by page and hydrates posts.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
pub use models::{Article, ArticleList, Config, MAX_POPULARITY};
pub use services::{ArticleIterator, ArticleStream, PttCrawler};
