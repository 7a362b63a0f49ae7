//! Domain models and types for bibexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`MmsId`])
//! - **Input records** ([`BibliographicRecord`])
//! - **Output layout** ([`COLUMNS`], [`OutputRow`])
//! - **Error types** ([`BibExportError`], [`AlmaError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BibExportError>`]:
//!
//! ```rust
//! use bibexport::domain::{BibExportError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = bibexport::config::load_config("bibexport.toml")?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod schema;

// Re-export commonly used types for convenience
pub use errors::{AlmaError, BibExportError};
pub use ids::MmsId;
pub use record::BibliographicRecord;
pub use result::Result;
pub use schema::{OutputRow, COLUMNS, COLUMN_COUNT};
