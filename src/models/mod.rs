// src/models/mod.rs

//! Domain models for the crawler.

mod article;
mod config;

// Re-export all public types
pub use article::{Article, ArticleList, MAX_POPULARITY};
pub(crate) use article::Hydrated;
pub use config::{ClientConfig, Config, DetailConfig, LoggingConfig};
