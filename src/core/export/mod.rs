//! Export orchestration and CSV output
//!
//! - [`writer`] - CSV serialization of mapped records
//! - [`coordinator`] - id list → fetch → write workflow
//! - [`summary`] - Summary and reporting

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::{apply_row_limit, ExportCoordinator, ExportRequest};
pub use summary::{ExportSummary, FailedRecord};
pub use writer::{export_to_file, output_file_name, write_records, ExportOutcome, RecordCounts};
