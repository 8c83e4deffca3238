//! Document error types
//!
//! Failures raised by document and page providers.

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Page number outside `1..=num_pages`
    #[error("Page not found: {0}")]
    PageNotFound(u32),

    /// Provider could not produce text content for a page
    #[error("Text extraction error: {0}")]
    TextExtractionError(String),

    /// Failed to parse a document description
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Timeout error
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result
pub type DocumentResult<T> = Result<T>;

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::ParseError(err.to_string())
    }
}
