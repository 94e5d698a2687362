//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Lifecycle and per-document events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded (or defaults applied)
    ConfigLoaded,

    // Query server
    /// Query server loop started
    ServerStart,
    /// Query server reached end of input
    ServerStop,
    /// Registered functions cleared
    ViewReset,
    /// A view function was registered
    FunctionRegistered,
    /// A request could not be served
    RequestRejected,

    // Mapping
    /// Document produced a row
    DocumentMapped,
    /// Document did not qualify
    DocumentSkipped,
    /// Qualifying document could not be read
    DocumentFailed,

    // Batch
    BatchStart,
    BatchComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::ViewReset => "VIEW_RESET",
            Event::FunctionRegistered => "FUNCTION_REGISTERED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::DocumentMapped => "DOCUMENT_MAPPED",
            Event::DocumentSkipped => "DOCUMENT_SKIPPED",
            Event::DocumentFailed => "DOCUMENT_FAILED",
            Event::BatchStart => "BATCH_START",
            Event::BatchComplete => "BATCH_COMPLETE",
        }
    }

    /// Per-document events are logged at TRACE
    pub fn is_per_document(&self) -> bool {
        matches!(self, Event::DocumentMapped | Event::DocumentSkipped)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::DocumentFailed.as_str(), "DOCUMENT_FAILED");
        assert_eq!(Event::BatchComplete.to_string(), "BATCH_COMPLETE");
    }

    #[test]
    fn test_per_document() {
        assert!(Event::DocumentMapped.is_per_document());
        assert!(!Event::DocumentFailed.is_per_document());
        assert!(!Event::ServerStart.is_per_document());
    }
}
