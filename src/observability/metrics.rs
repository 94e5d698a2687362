//! Map counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; exact totals are read after the work is done

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Per-process mapping counters
#[derive(Debug, Default)]
pub struct MapMetrics {
    documents_seen: AtomicU64,
    rows_emitted: AtomicU64,
    documents_skipped: AtomicU64,
    documents_failed: AtomicU64,
}

impl MapMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document that produced `rows` rows
    pub fn record_mapped(&self, rows: u64) {
        self.documents_seen.fetch_add(1, Ordering::Relaxed);
        if rows == 0 {
            self.documents_skipped.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rows_emitted.fetch_add(rows, Ordering::Relaxed);
        }
    }

    /// Record a document that failed to map
    pub fn record_failed(&self) {
        self.documents_seen.fetch_add(1, Ordering::Relaxed);
        self.documents_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_seen: self.documents_seen.load(Ordering::Relaxed),
            rows_emitted: self.rows_emitted.load(Ordering::Relaxed),
            documents_skipped: self.documents_skipped.load(Ordering::Relaxed),
            documents_failed: self.documents_failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`MapMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub documents_seen: u64,
    pub rows_emitted: u64,
    pub documents_skipped: u64,
    pub documents_failed: u64,
}

impl MetricsSnapshot {
    /// Counters as log fields
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("documents_seen", self.documents_seen.to_string()),
            ("rows_emitted", self.rows_emitted.to_string()),
            ("documents_skipped", self.documents_skipped.to_string()),
            ("documents_failed", self.documents_failed.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = MapMetrics::new();
        metrics.record_mapped(1);
        metrics.record_mapped(0);
        metrics.record_mapped(1);
        metrics.record_failed();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                documents_seen: 4,
                rows_emitted: 2,
                documents_skipped: 1,
                documents_failed: 1,
            }
        );
    }

    #[test]
    fn test_fields() {
        let snapshot = MetricsSnapshot {
            documents_seen: 3,
            ..Default::default()
        };
        let fields = snapshot.fields();
        assert_eq!(fields[0], ("documents_seen", "3".to_string()));
    }
}
