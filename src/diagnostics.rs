//! Diagnostic event channel for the classification pass.
//!
//! Per-record conditions that are observable but must not disturb control
//! flow, chiefly short records, are reported through [`DiagnosticSink`]
//! rather than printed from inside the extraction path. Callers subscribe
//! by passing their own sink to the classifier; the default [`LogSink`]
//! routes everything to the `log` facade.

use std::sync::Mutex;

/// Receives diagnostic events during a classification run.
///
/// All methods have no-op defaults so implementors can subscribe to only
/// the events they care about.
pub trait DiagnosticSink: Send + Sync {
    /// Called when a record cannot satisfy a key specification: the record
    /// has fewer fields than requested, the field is empty, or the line is
    /// shorter than a fixed-width span. Key derivation for the record stops
    /// at `ordinal`; specs after it are skipped.
    ///
    /// # Arguments
    ///
    /// * `record_index` - Zero-based input position of the record
    /// * `ordinal` - Ordinal of the spec that could not be satisfied
    /// * `detail` - Human-readable description of the shortage
    fn on_short_record(&self, _record_index: usize, _ordinal: usize, _detail: &str) {}

    /// Called after each record is routed.
    ///
    /// # Arguments
    ///
    /// * `record_index` - Zero-based input position of the record
    /// * `is_duplicate` - Whether the record was routed to the duplicate output
    fn on_record(&self, _record_index: usize, _is_duplicate: bool) {}
}

/// Default sink: short records go to `log::warn!`, routing to `log::trace!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn on_short_record(&self, record_index: usize, ordinal: usize, detail: &str) {
        log::warn!(
            "Record {} is short for key spec #{}: {}",
            record_index + 1,
            ordinal,
            detail
        );
    }

    fn on_record(&self, record_index: usize, is_duplicate: bool) {
        log::trace!(
            "Record {} routed to {}",
            record_index + 1,
            if is_duplicate { "duplicate" } else { "unique" }
        );
    }
}

/// A short-record event captured by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortRecordEvent {
    /// Zero-based input position of the record.
    pub record_index: usize,
    /// Ordinal of the spec that could not be satisfied.
    pub ordinal: usize,
    /// Human-readable description of the shortage.
    pub detail: String,
}

/// Sink that records short-record events for later inspection.
///
/// Mainly useful in tests and in callers that want to surface shortage
/// counts to users after a run.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ShortRecordEvent>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the short-record events seen so far.
    #[must_use]
    pub fn short_records(&self) -> Vec<ShortRecordEvent> {
        self.events.lock().expect("diagnostics lock poisoned").clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn on_short_record(&self, record_index: usize, ordinal: usize, detail: &str) {
        self.events
            .lock()
            .expect("diagnostics lock poisoned")
            .push(ShortRecordEvent {
                record_index,
                ordinal,
                detail: detail.to_string(),
            });
    }
}
