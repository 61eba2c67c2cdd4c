//! Error types for the audit engine.
//!
//! This module provides structured error handling with:
//! - `AuditError`: Domain-specific errors for audit operations
//! - `Result<T>`: Type alias for Results using AuditError

use thiserror::Error;

/// Domain-specific errors for audit operations.
///
/// Only transport-level failures are fatal to an audit. Recoverable
/// conditions (missing tags, invalid JSON-LD, failed robots.txt probes)
/// are handled inside the extraction pipeline and never reach this enum.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetching the target page failed (transport error, timeout, non-2xx)
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Recommendation collaborator failed or returned unusable output
    #[error("Recommendation service error: {0}")]
    RecommendationFailed(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AuditError {
    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }
}

impl From<url::ParseError> for AuditError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        Self::FetchFailed {
            url,
            reason: error.to_string(),
        }
    }
}

/// Result type alias using AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
