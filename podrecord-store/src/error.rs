//! Error types for the transport layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while fetching or saving documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// No document at this URL.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The caller may not read or write this document.
    #[error("access denied to {url} (status {status})")]
    AccessDenied { url: String, status: u16 },

    /// Any other unsuccessful HTTP response.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// The document body could not be parsed.
    #[error("parse error in {url}: {message}")]
    Parse { url: String, message: String },

    /// The document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl StoreError {
    /// Whether the document simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
