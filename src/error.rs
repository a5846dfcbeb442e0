//! Error taxonomy for the crawl engine.
//!
//! Absent leaf fields are not errors here; they surface as `None` and are
//! rendered as the absence sentinel when a record is emitted.

use thiserror::Error;

/// Errors that abort a crawl run.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// A user-supplied filter failed validation. Raised before any crawl I/O.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// An upstream document no longer has the shape the engine relies on.
    #[error("Unexpected page structure: {0}")]
    Parse(String),

    /// Fetch failed (network, timeout or non-success status). Never retried.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlError {
    pub(crate) fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        CrawlError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
