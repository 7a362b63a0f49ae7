//! Export coordinator - main orchestrator for the export process
//!
//! Reads the identifier list, applies the row limit, fetches records through
//! a [`BibSource`], writes the CSV file and builds the [`ExportSummary`].

use crate::adapters::alma::{AlmaClient, BibSource};
use crate::adapters::idlist::read_mms_ids;
use crate::config::BibExportConfig;
use crate::core::export::summary::{ExportSummary, FailedRecord};
use crate::core::export::writer::{export_to_file, output_file_name};
use crate::core::mapping::RowMapper;
use crate::core::report::{Reporter, TracingReporter};
use crate::domain::ids::MmsId;
use crate::domain::{BibExportError, Result};
use crate::{log_export_complete, log_export_start};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// What to export and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// CSV file of MMS IDs
    pub ids_file: PathBuf,
    /// Destination CSV file
    pub output_path: PathBuf,
    /// Process only the first N identifiers
    pub row_limit: Option<usize>,
}

impl ExportRequest {
    /// Build a request from configuration, naming the output file after `at`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no identifier file is configured.
    pub fn from_config(config: &BibExportConfig, at: &DateTime<Local>) -> Result<Self> {
        let ids_file = config
            .input
            .ids_file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| {
                BibExportError::Configuration(
                    "No identifier file given (set input.ids_file or pass --ids-file)".to_string(),
                )
            })?;

        let output_path = Path::new(&config.output.directory)
            .join(output_file_name(&config.output.file_prefix, at));

        Ok(Self {
            ids_file: PathBuf::from(ids_file),
            output_path,
            row_limit: config.input.row_limit,
        })
    }
}

/// Keep the first `limit` identifiers
pub fn apply_row_limit(mut ids: Vec<MmsId>, limit: Option<usize>) -> Vec<MmsId> {
    if let Some(limit) = limit {
        if ids.len() > limit {
            tracing::info!(
                limit,
                available = ids.len(),
                "Row limit applied, processing first identifiers only"
            );
            ids.truncate(limit);
        }
    }
    ids
}

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn BibSource>,
    mapper: RowMapper,
    reporter: Arc<dyn Reporter>,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the configured Alma API
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API client cannot be built.
    pub fn new(config: &BibExportConfig) -> Result<Self> {
        let client = AlmaClient::new(&config.alma)?;
        Ok(Self::with_source(
            Arc::new(client),
            RowMapper::new(config.mapping.to_options()),
            Arc::new(TracingReporter),
        ))
    }

    /// Create a coordinator over any record source
    pub fn with_source(
        source: Arc<dyn BibSource>,
        mapper: RowMapper,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            source,
            mapper,
            reporter,
        }
    }

    /// Read the identifier list and apply the row limit
    ///
    /// # Errors
    ///
    /// Returns `IdList` if the file is missing or holds no identifiers.
    pub fn load_ids(&self, request: &ExportRequest) -> Result<Vec<MmsId>> {
        let ids = read_mms_ids(&request.ids_file)?;
        if ids.is_empty() {
            return Err(BibExportError::IdList(format!(
                "No MMS IDs found in {}",
                request.ids_file.display()
            )));
        }
        Ok(apply_row_limit(ids, request.row_limit))
    }

    /// Execute the export
    ///
    /// 1. Reads identifiers (row limit applied)
    /// 2. Fetches one record per identifier, skipping failures
    /// 3. Writes the CSV file
    /// 4. Returns the summary
    pub async fn execute_export(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let ids = self.load_ids(request)?;
        self.export_ids(&ids, &request.output_path).await
    }

    /// Fetch and export an already-read identifier list
    ///
    /// # Errors
    ///
    /// Only output failures are errors; unretrievable records are listed in
    /// the summary.
    pub async fn export_ids(&self, ids: &[MmsId], output_path: &Path) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.total_ids = ids.len();

        log_export_start!(ids.len(), output_path.display());

        let reporter = self.reporter.as_ref();
        let progress = |current: usize, total: usize| reporter.fetch_progress(current, total);
        let report = self.source.fetch_records(ids, &progress).await;

        summary.retrieved_records = report.records.len();
        for (mms_id, reason) in report.failed {
            self.reporter.fetch_failed(mms_id.as_str(), &reason);
            summary.add_failure(FailedRecord::new(mms_id, reason));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BibExportError::Io(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let outcome = export_to_file(&report.records, output_path, &self.mapper, reporter)?;
        summary.record_outcome(&outcome);

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.active_records + summary.deleted_records, summary.duration);
        summary.log_summary();

        Ok(summary)
    }
}
