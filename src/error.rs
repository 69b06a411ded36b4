// src/error.rs
// =============================================================================
// Errors that stop a crawl before it starts or after it finishes.
//
// Failures while visiting a single page are NOT errors here: they are
// recorded as broken links and the crawl carries on. Only problems that make
// the whole run impossible (bad seed URL, bad selector, unwritable output)
// end up in SitemapError.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid sidebar selector '{0}'")]
    InvalidSelector(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SitemapError>;
