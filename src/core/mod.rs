//! Core business logic for bibexport.
//!
//! # Modules
//!
//! - [`extract`] - Field extraction from flat attributes, Dublin Core XML and MARC
//! - [`deletion`] - Deleted-record detection
//! - [`mapping`] - Projection of a record onto the fixed column schema
//! - [`export`] - CSV writing, export coordination and summary
//! - [`report`] - Observability sink for the pipeline
//!
//! # Export Workflow
//!
//! 1. **Read ids**: MMS IDs from the input CSV, row limit applied
//! 2. **Fetch**: one record per identifier from the Alma Bibs API
//! 3. **Map**: each record becomes a row or a deletion marker
//! 4. **Write**: header, rows and markers in input order
//! 5. **Report**: export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use bibexport::config::load_config;
//! use bibexport::core::export::{ExportCoordinator, ExportRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bibexport.toml")?;
//! let request = ExportRequest::from_config(&config, &chrono::Local::now())?;
//!
//! let coordinator = ExportCoordinator::new(&config)?;
//! let summary = coordinator.execute_export(&request).await?;
//!
//! println!("Active: {}", summary.active_records);
//! println!("Deleted: {}", summary.deleted_records);
//! println!("Failed: {}", summary.failed_records());
//! # Ok(())
//! # }
//! ```

pub mod deletion;
pub mod export;
pub mod extract;
pub mod mapping;
pub mod report;
