//! MMS ID list reader
//!
//! Reads identifiers from a UTF-8 CSV file. The delimiter is sniffed from
//! the first line (tab, then semicolon, then comma). The first row is taken
//! as a header when any cell is non-numeric; the id column is then the first
//! header mentioning both "mms" and "id", falling back to column 0.

use crate::domain::ids::MmsId;
use crate::domain::{BibExportError, Result};
use std::path::Path;

/// Pick the field delimiter from the first line
pub fn sniff_delimiter(first_line: &str) -> u8 {
    if first_line.contains('\t') {
        b'\t'
    } else if first_line.contains(';') && !first_line.contains(',') {
        b';'
    } else {
        b','
    }
}

fn looks_like_header(row: &[String]) -> bool {
    row.iter().any(|cell| {
        let cell = cell.trim();
        !cell.is_empty() && !cell.chars().all(|c| c.is_ascii_digit())
    })
}

fn id_column(header: &[String]) -> Option<usize> {
    header.iter().position(|name| {
        let name = name.to_lowercase().replace(' ', "");
        name.contains("mms") && name.contains("id")
    })
}

/// Parse MMS IDs from CSV text
///
/// # Errors
///
/// Returns `IdList` if the text is not readable CSV.
pub fn parse_mms_ids(content: &str) -> Result<Vec<MmsId>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line = content.lines().next().unwrap_or_default().trim();
    let delimiter = sniff_delimiter(first_line);
    tracing::debug!(delimiter = %(delimiter as char).escape_default(), "Using delimiter");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = reader.records().map(|row| {
        row.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
            .map_err(|e| BibExportError::IdList(format!("Malformed CSV: {e}")))
    });

    let Some(first_row) = rows.next().transpose()? else {
        tracing::warn!("No MMS IDs found in file");
        return Ok(Vec::new());
    };

    let has_header = looks_like_header(&first_row);
    let column = if has_header {
        match id_column(&first_row) {
            Some(index) => {
                tracing::info!(column = %first_row[index], index, "Found MMS ID column");
                index
            }
            None => {
                tracing::warn!(
                    column = first_row.first().map(String::as_str).unwrap_or_default(),
                    "No MMS ID column found in header, using first column"
                );
                0
            }
        }
    } else {
        tracing::info!("No header detected, using first column for MMS IDs");
        0
    };

    let data_rows = if has_header { None } else { Some(Ok(first_row)) };

    let mut ids = Vec::new();
    for row in data_rows.into_iter().chain(rows) {
        let row = row?;
        let Some(value) = row.get(column).map(|v| v.trim()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if value.starts_with('#') {
            tracing::debug!(line = %value.chars().take(50).collect::<String>(), "Skipping comment line");
            continue;
        }
        if has_header && value.chars().all(char::is_alphabetic) {
            continue;
        }
        if let Ok(id) = MmsId::new(value) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        tracing::warn!("No MMS IDs found in file");
    }
    Ok(ids)
}

/// Read MMS IDs from a CSV file
///
/// # Errors
///
/// Returns `IdList` if the file is missing, unreadable, or malformed.
///
/// # Example
///
/// ```no_run
/// use bibexport::adapters::idlist::read_mms_ids;
///
/// let ids = read_mms_ids("mms_ids.csv").unwrap();
/// println!("{} identifiers", ids.len());
/// ```
pub fn read_mms_ids(path: impl AsRef<Path>) -> Result<Vec<MmsId>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Reading MMS IDs from CSV file");

    if !path.exists() {
        return Err(BibExportError::IdList(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        BibExportError::IdList(format!("Error reading CSV file {}: {e}", path.display()))
    })?;

    let ids = parse_mms_ids(&content)?;
    tracing::info!(count = ids.len(), "Read MMS IDs from CSV file");
    Ok(ids)
}
