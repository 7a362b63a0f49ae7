//! Record source trait
//!
//! `BibSource` abstracts where bibliographic records come from, so the
//! export coordinator can run against the live Alma API or a test double.

use crate::domain::ids::MmsId;
use crate::domain::{BibliographicRecord, Result};
use async_trait::async_trait;

/// Progress callback: `(current, total)` after each identifier resolves
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Send + Sync);

/// Outcome of fetching a list of identifiers
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Records retrieved, in identifier order
    pub records: Vec<BibliographicRecord>,
    /// Identifiers that could not be retrieved, with the reason
    pub failed: Vec<(MmsId, String)>,
}

impl FetchReport {
    /// Number of identifiers attempted
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failed.len()
    }

    /// Failed identifiers, first `limit` only
    pub fn failed_preview(&self, limit: usize) -> String {
        let mut preview = self
            .failed
            .iter()
            .take(limit)
            .map(|(id, _)| id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if self.failed.len() > limit {
            preview.push_str("...");
        }
        preview
    }
}

/// Source of bibliographic records
///
/// # Example
///
/// ```no_run
/// use bibexport::adapters::alma::{AlmaClient, BibSource};
/// use bibexport::config::AlmaConfig;
/// use bibexport::domain::ids::MmsId;
///
/// # async fn example() -> bibexport::domain::Result<()> {
/// let client = AlmaClient::new(&AlmaConfig::default())?;
/// let ids: Vec<MmsId> = vec!["991234567890104641".parse().map_err(bibexport::domain::BibExportError::Validation)?];
/// let report = client
///     .fetch_records(&ids, &|current, total| println!("{current}/{total}"))
///     .await;
/// println!("retrieved {}", report.records.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait BibSource: Send + Sync {
    /// Fetch one record
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be retrieved or the response is
    /// not a bibliographic record.
    async fn fetch_record(&self, mms_id: &MmsId) -> Result<BibliographicRecord>;

    /// Where records come from, for logging
    fn describe(&self) -> String;

    /// Fetch records one at a time, in order
    ///
    /// Per-identifier failures are logged and collected; they never abort the
    /// batch. `progress` fires after every identifier.
    async fn fetch_records(&self, ids: &[MmsId], progress: ProgressFn<'_>) -> FetchReport {
        let total = ids.len();
        let mut report = FetchReport::default();

        tracing::info!(
            total,
            source = %self.describe(),
            "Starting retrieval of bibliographic records"
        );

        for (index, mms_id) in ids.iter().enumerate() {
            let current = index + 1;
            tracing::debug!(current, total, mms_id = %mms_id, "Fetching record");

            match self.fetch_record(mms_id).await {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    tracing::warn!(mms_id = %mms_id, error = %e, "Failed to retrieve record");
                    report.failed.push((mms_id.clone(), e.to_string()));
                }
            }

            progress(current, total);
        }

        tracing::info!(
            retrieved = report.records.len(),
            failed = report.failed.len(),
            "Retrieval completed"
        );
        if !report.failed.is_empty() {
            tracing::warn!(failed_ids = %report.failed_preview(10), "Some records were not retrieved");
        }

        report
    }
}
