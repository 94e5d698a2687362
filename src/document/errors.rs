//! Document access errors
//!
//! Raised only for documents that pass the view's qualification check.
//! Non-qualifying documents are filtered, never reported.

use thiserror::Error;

/// Result type for document access
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failures while reading a qualifying document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Field {0} is not an object")]
    NotAnObject(String),

    #[error("Field {path} has wrong type: expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },

    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl DocumentError {
    /// Dotted path of the offending field, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            DocumentError::MissingField(path) | DocumentError::NotAnObject(path) => Some(path),
            DocumentError::WrongType { path, .. } => Some(path),
            DocumentError::InvalidTimestamp { .. } => None,
        }
    }

    /// Returns true for timestamp parse failures
    pub fn is_timestamp(&self) -> bool {
        matches!(self, DocumentError::InvalidTimestamp { .. })
    }
}
