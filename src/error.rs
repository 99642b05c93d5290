// src/error.rs

//! Unified error handling for the crawler.

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network-level failure while fetching a page
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Bad status: {0}")]
    BadStatus(String),

    /// The iterator has nothing left to yield
    #[error("Article list is empty")]
    EmptyList,

    /// The iterator hit a page fetch error and will not recover
    #[error("Iterator failed: {0}")]
    IteratorFailed(Arc<AppError>),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// A background task panicked or was aborted
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a bad status error from a status line.
    pub fn bad_status(status: impl ToString) -> Self {
        Self::BadStatus(status.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error happened below the HTTP status layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
