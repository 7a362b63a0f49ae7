//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::export::writer::ExportOutcome;
use crate::domain::ids::MmsId;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifiers read from the input list (after the row limit)
    pub total_ids: usize,

    /// Records retrieved from the API
    pub retrieved_records: usize,

    /// Data lines written
    pub active_records: usize,

    /// Deletion markers written
    pub deleted_records: usize,

    /// Output file, once written
    pub output_path: Option<PathBuf>,

    /// Output file size
    pub file_size_bytes: u64,

    /// Duration of the export
    pub duration: Duration,

    /// Identifiers skipped because retrieval failed
    pub failures: Vec<FailedRecord>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_ids: 0,
            retrieved_records: 0,
            active_records: 0,
            deleted_records: 0,
            output_path: None,
            file_size_bytes: 0,
            duration: Duration::from_secs(0),
            failures: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a skipped identifier
    pub fn add_failure(&mut self, failure: FailedRecord) {
        self.failures.push(failure);
    }

    /// Copy counts from a written export file
    pub fn record_outcome(&mut self, outcome: &ExportOutcome) {
        self.active_records = outcome.active_records;
        self.deleted_records = outcome.deleted_records;
        self.file_size_bytes = outcome.file_size_bytes;
        self.output_path = Some(outcome.path.clone());
    }

    /// Identifiers that could not be retrieved
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.mms_id.as_str()).collect()
    }

    /// Number of identifiers that could not be retrieved
    pub fn failed_records(&self) -> usize {
        self.total_ids.saturating_sub(self.retrieved_records)
    }

    /// Check if the export was successful (every identifier retrieved)
    pub fn is_successful(&self) -> bool {
        self.failed_records() == 0 && self.failures.is_empty()
    }

    /// Get retrieval rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_ids == 0 {
            return 100.0;
        }
        (self.retrieved_records as f64 / self.total_ids as f64) * 100.0
    }

    /// Process exit code: 0 when complete, 1 when some records were skipped
    pub fn exit_code(&self) -> i32 {
        if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_ids = self.total_ids,
            retrieved = self.retrieved_records,
            failed = self.failed_records(),
            active = self.active_records,
            deleted = self.deleted_records,
            file_size_bytes = self.file_size_bytes,
            output = %self.output_path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failed_count = self.failures.len(),
                "Export completed with skipped records"
            );
            for failure in &self.failures {
                tracing::warn!(
                    mms_id = %failure.mms_id,
                    message = %failure.message,
                    "Record skipped"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// An identifier that could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecord {
    /// Identifier requested
    pub mms_id: MmsId,

    /// Why retrieval failed
    pub message: String,
}

impl FailedRecord {
    /// Create a new failed record entry
    pub fn new(mms_id: MmsId, message: String) -> Self {
        Self { mms_id, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> MmsId {
        MmsId::new(value).unwrap()
    }

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_ids, 0);
        assert_eq!(summary.retrieved_records, 0);
        assert_eq!(summary.active_records, 0);
        assert_eq!(summary.deleted_records, 0);
        assert!(summary.output_path.is_none());
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failures.is_empty());
        assert!(summary.is_successful());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_partial_retrieval_is_not_successful() {
        let mut summary = ExportSummary::new();
        summary.total_ids = 3;
        summary.retrieved_records = 2;
        summary.add_failure(FailedRecord::new(id("993"), "not found".to_string()));

        assert!(!summary.is_successful());
        assert_eq!(summary.failed_records(), 1);
        assert_eq!(summary.failed_ids(), vec!["993"]);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_export_summary_success_rate() {
        let mut summary = ExportSummary::new();
        summary.total_ids = 100;
        summary.retrieved_records = 95;

        assert_eq!(summary.success_rate(), 95.0);

        summary.total_ids = 0;
        summary.retrieved_records = 0;
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_record_outcome() {
        let mut summary = ExportSummary::new();
        summary.record_outcome(&ExportOutcome {
            path: PathBuf::from("exports/out.csv"),
            active_records: 4,
            deleted_records: 1,
            file_size_bytes: 2048,
        });

        assert_eq!(summary.active_records, 4);
        assert_eq!(summary.deleted_records, 1);
        assert_eq!(summary.file_size_bytes, 2048);
        assert_eq!(summary.output_path, Some(PathBuf::from("exports/out.csv")));
    }
}
