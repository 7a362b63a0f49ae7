// Bibexport - Alma bibliographic records to Dublin Core CSV
// Copyright (c) 2025 Bibexport Contributors
// Licensed under the MIT License

//! # Bibexport - Alma bibliographic records to Dublin Core CSV
//!
//! Bibexport fetches bibliographic records from the Alma Bibs API by MMS ID,
//! normalizes their embedded Dublin Core XML, MARC datafields and flat
//! attributes, and writes a fixed 68-column CSV export.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** MMS IDs from a CSV list (delimiter and header detection)
//! - **Fetching** one record per identifier, skipping the ones that fail
//! - **Mapping** each record onto the column schema, or marking it deleted
//! - **Writing** header, rows and deletion markers in input order
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Extraction, deletion detection, mapping, export
//! - [`adapters`] - Alma API client and identifier list reader
//! - [`domain`] - Records, identifiers, column schema, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bibexport::config::load_config;
//! use bibexport::core::export::{ExportCoordinator, ExportRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("bibexport.toml")?;
//!     let request = ExportRequest::from_config(&config, &chrono::Local::now())?;
//!
//!     let coordinator = ExportCoordinator::new(&config)?;
//!     let summary = coordinator.execute_export(&request).await?;
//!
//!     println!("Exported {} rows", summary.active_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Mapping a single record
//!
//! The mapper is synchronous and needs no network:
//!
//! ```rust
//! use bibexport::core::mapping::{Mapped, RowMapper};
//! use bibexport::domain::BibliographicRecord;
//! use serde_json::json;
//!
//! let record = BibliographicRecord::from_value(json!({
//!     "mms_id": "991234567890104641",
//!     "title": "Field notes",
//! }))
//! .unwrap();
//!
//! match RowMapper::default().map_record(&record) {
//!     Mapped::Row(row) => assert_eq!(row.first("dc:title"), Some("Field notes")),
//!     Mapped::Deleted { .. } => unreachable!(),
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error type is
//! [`domain::BibExportError`]. Field extraction never fails: malformed or
//! missing data becomes an empty cell.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
