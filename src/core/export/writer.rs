//! CSV serialization of mapped records
//!
//! Active records become RFC 4180 data lines written through the `csv`
//! crate. Deleted records become the raw comment line
//! `# DELETED RECORD - MMS ID: <id>`. A CSV writer owns the sink; before a
//! marker it hands the flushed sink back, so both kinds of line land in
//! input order.

use crate::core::mapping::{Mapped, RowMapper};
use crate::core::report::Reporter;
use crate::domain::context::ResultExt;
use crate::domain::schema::COLUMNS;
use crate::domain::{BibExportError, BibliographicRecord, Result};
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Prefix of a deletion marker line
pub const DELETED_MARKER_PREFIX: &str = "# DELETED RECORD - MMS ID: ";

/// Default output file prefix
pub const DEFAULT_FILE_PREFIX: &str = "alma_export";

/// Line counts of one export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    /// Data lines written
    pub active: usize,
    /// Deletion markers written
    pub deleted: usize,
}

/// Result of writing an export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// File written
    pub path: PathBuf,
    /// Data lines written
    pub active_records: usize,
    /// Deletion markers written
    pub deleted_records: usize,
    /// Final file size
    pub file_size_bytes: u64,
}

/// `<prefix>_YYYYMMDD_HHMMSS.csv`
pub fn output_file_name<Tz>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.csv", prefix, at.format("%Y%m%d_%H%M%S"))
}

/// Writes a raw marker line and resumes CSV output on the same sink
fn write_marker<W: Write>(writer: csv::Writer<W>, mms_id: &str) -> Result<csv::Writer<W>> {
    let mut sink = writer.into_inner().map_err(|e| e.into_error())?;
    writeln!(sink, "{DELETED_MARKER_PREFIX}{mms_id}")?;
    Ok(csv::Writer::from_writer(sink))
}

/// Writes the header and one line per record to `sink`
///
/// Records are mapped in order; the sink is flushed before returning. Any
/// sink failure aborts the batch.
pub fn write_records<W: Write>(
    sink: W,
    records: &[BibliographicRecord],
    mapper: &RowMapper,
    reporter: &dyn Reporter,
) -> Result<RecordCounts> {
    let mut counts = RecordCounts::default();
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(COLUMNS)?;
    tracing::debug!(columns = COLUMNS.len(), "CSV header written");

    for (index, record) in records.iter().enumerate() {
        match mapper.map_record(record) {
            Mapped::Row(row) => {
                writer.write_record(row.values())?;
                counts.active += 1;
            }
            Mapped::Deleted { mms_id } => {
                writer = write_marker(writer, &mms_id)?;
                reporter.record_deleted(&mms_id);
                counts.deleted += 1;
            }
        }

        let written = index + 1;
        if written % 10 == 0 {
            tracing::debug!(written, total = records.len(), "Exported records");
        }
    }

    writer.flush()?;
    Ok(counts)
}

/// Creates (or overwrites) `path` and writes the export into it
pub fn export_to_file(
    records: &[BibliographicRecord],
    path: &Path,
    mapper: &RowMapper,
    reporter: &dyn Reporter,
) -> Result<ExportOutcome> {
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Starting CSV export"
    );

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut sink = BufWriter::new(file);

    let counts = write_records(&mut sink, records, mapper, reporter)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let file = sink
        .into_inner()
        .map_err(|e| BibExportError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;
    file.sync_all()?;

    let file_size_bytes = std::fs::metadata(path)?.len();

    let outcome = ExportOutcome {
        path: path.to_path_buf(),
        active_records: counts.active,
        deleted_records: counts.deleted,
        file_size_bytes,
    };
    reporter.export_completed(&outcome);

    Ok(outcome)
}
