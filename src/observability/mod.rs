//! Observability: structured logging, typed events and map counters
//!
//! Observability is read-only: it never changes what gets emitted, and a
//! failure to write a log line is ignored.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MapMetrics, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields.
///
/// Per-document events go out at TRACE, failures at WARN, everything else
/// at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::DocumentFailed | Event::RequestRejected => Severity::Warn,
        e if e.is_per_document() => Severity::Trace,
        _ => Severity::Info,
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::ServerStart);
        log_event_with_fields(Event::DocumentFailed, &[("doc_id", "x")]);
    }
}
