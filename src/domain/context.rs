//! Error context extension trait
//!
//! Adds `.context()` / `.with_context()` to any result whose error converts
//! into [`BibExportError`], keeping the library on its own error type instead
//! of `anyhow`.
//!
//! # Examples
//!
//! ```rust
//! use bibexport::domain::Result;
//! use bibexport::domain::context::ResultExt;
//!
//! fn read_ids(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read identifier list: {}", path))
//! }
//! ```

use crate::domain::errors::BibExportError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error (evaluated eagerly)
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BibExportError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

/// Prefixes the message while keeping sink failures classified as such
fn wrap(base: BibExportError, context: impl std::fmt::Display) -> BibExportError {
    match base {
        BibExportError::Io(msg) => BibExportError::Io(format!("{context}: {msg}")),
        BibExportError::Csv(msg) => BibExportError::Csv(format!("{context}: {msg}")),
        BibExportError::IdList(msg) => BibExportError::IdList(format!("{context}: {msg}")),
        other => BibExportError::Other(format!("{context}: {other}")),
    }
}
