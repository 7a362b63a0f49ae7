//! Observability sink for the export pipeline
//!
//! The exporter and coordinator report through a [`Reporter`] instead of
//! logging directly, so front-ends can surface progress their own way.
//! [`TracingReporter`] forwards everything to `tracing`.

use crate::core::export::writer::ExportOutcome;

/// Receives pipeline events
///
/// All methods default to doing nothing.
pub trait Reporter: Send + Sync {
    /// One identifier has been resolved (successfully or not)
    fn fetch_progress(&self, _current: usize, _total: usize) {}

    /// A record could not be retrieved and was skipped
    fn fetch_failed(&self, _mms_id: &str, _reason: &str) {}

    /// A record was written as a deletion marker
    fn record_deleted(&self, _mms_id: &str) {}

    /// The output file is complete
    fn export_completed(&self, _outcome: &ExportOutcome) {}
}

/// Reporter backed by `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

/// Progress is logged at info level every this many identifiers
const PROGRESS_INTERVAL: usize = 10;

impl Reporter for TracingReporter {
    fn fetch_progress(&self, current: usize, total: usize) {
        if current % PROGRESS_INTERVAL == 0 || current == total {
            tracing::info!(current, total, "Retrieval progress");
        } else {
            tracing::debug!(current, total, "Retrieval progress");
        }
    }

    fn fetch_failed(&self, mms_id: &str, reason: &str) {
        tracing::warn!(mms_id = %mms_id, reason = %reason, "Record skipped");
    }

    fn record_deleted(&self, mms_id: &str) {
        tracing::debug!(mms_id = %mms_id, "Record written as deletion marker");
    }

    fn export_completed(&self, outcome: &ExportOutcome) {
        tracing::info!(
            path = %outcome.path.display(),
            file_size_bytes = outcome.file_size_bytes,
            active_records = outcome.active_records,
            deleted_records = outcome.deleted_records,
            "CSV export completed"
        );
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}
