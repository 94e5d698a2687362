//! View error types
//!
//! Error codes:
//! - FEEDVIEW_MISSING_FIELD
//! - FEEDVIEW_MALFORMED_FIELD
//! - FEEDVIEW_INVALID_TIMESTAMP
//!
//! A view error fails the current document only. The adapter running the
//! view decides whether to skip the document or stop.

use std::fmt;

use serde_json::Value;

use crate::document::DocumentError;

/// View error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorCode {
    /// A required nested object or field is absent
    MissingField,
    /// A field is present with the wrong JSON type
    MalformedField,
    /// `postedTime` could not be parsed
    InvalidTimestamp,
}

impl ViewErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ViewErrorCode::MissingField => "FEEDVIEW_MISSING_FIELD",
            ViewErrorCode::MalformedField => "FEEDVIEW_MALFORMED_FIELD",
            ViewErrorCode::InvalidTimestamp => "FEEDVIEW_INVALID_TIMESTAMP",
        }
    }

    fn classify(err: &DocumentError) -> Self {
        match err {
            DocumentError::MissingField(_) => ViewErrorCode::MissingField,
            DocumentError::NotAnObject(_) | DocumentError::WrongType { .. } => {
                ViewErrorCode::MalformedField
            }
            DocumentError::InvalidTimestamp { .. } => ViewErrorCode::InvalidTimestamp,
        }
    }
}

impl fmt::Display for ViewErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure to map one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    code: ViewErrorCode,
    source: DocumentError,
    doc_id: Option<String>,
}

impl ViewError {
    /// Attach the failing document's `_id`, when it has one
    pub fn for_document(source: DocumentError, doc: &Value) -> Self {
        let doc_id = doc.get("_id").and_then(Value::as_str).map(str::to_string);
        Self {
            doc_id,
            ..Self::from(source)
        }
    }

    pub fn code(&self) -> ViewErrorCode {
        self.code
    }

    /// The underlying document error
    pub fn document_error(&self) -> &DocumentError {
        &self.source
    }

    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }

    /// Human-readable message without the code prefix
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

impl From<DocumentError> for ViewError {
    fn from(source: DocumentError) -> Self {
        Self {
            code: ViewErrorCode::classify(&source),
            source,
            doc_id: None,
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.source)?;
        if let Some(ref id) = self.doc_id {
            write!(f, " (doc {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes() {
        let missing = ViewError::from(DocumentError::MissingField("actor".into()));
        assert_eq!(missing.code().code(), "FEEDVIEW_MISSING_FIELD");

        let wrong = ViewError::from(DocumentError::NotAnObject("object".into()));
        assert_eq!(wrong.code(), ViewErrorCode::MalformedField);

        let ts = ViewError::from(DocumentError::InvalidTimestamp {
            value: "x".into(),
            reason: "bad".into(),
        });
        assert_eq!(ts.code().code(), "FEEDVIEW_INVALID_TIMESTAMP");
    }

    #[test]
    fn test_display_includes_doc_id() {
        let err = ViewError::for_document(
            DocumentError::MissingField("provider".into()),
            &json!({ "_id": "abc123" }),
        );
        let display = err.to_string();
        assert!(display.starts_with("FEEDVIEW_MISSING_FIELD"));
        assert!(display.contains("provider"));
        assert!(display.ends_with("(doc abc123)"));
        assert_eq!(err.doc_id(), Some("abc123"));
    }

    #[test]
    fn test_no_doc_id() {
        let err = ViewError::for_document(
            DocumentError::MissingField("provider".into()),
            &json!({ "_id": 7 }),
        );
        assert_eq!(err.doc_id(), None);
        assert_eq!(err.message(), "Missing field: provider");
    }
}
