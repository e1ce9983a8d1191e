//! Error types for document segmentation

use thiserror::Error;

/// Why a document could not be segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Shorter than the configured minimum
    #[error("document is {len} bytes, minimum is {min}")]
    TooShort { len: usize, min: usize },

    /// No level-1 title heading
    #[error("document has no title heading")]
    MissingTitle,

    /// Blocks appear before the title heading
    #[error("document has content before its title heading")]
    ContentBeforeTitle,

    /// Title heading with no body to segment
    #[error("document has no sections after its title")]
    NoSections,
}

/// Document errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The input lacks the structure required for segmentation
    #[error("Malformed document: {0}")]
    Malformed(#[from] MalformedReason),

    /// Tab selection for an id that does not exist
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
