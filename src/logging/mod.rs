//! Logging and observability
//!
//! Structured logging via `tracing`:
//! - human-readable console output on stderr
//! - JSON log files with rotation
//! - level from configuration, `--log-level`, or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use bibexport::logging::init_logging;
//! use bibexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use bibexport::log_export_start;
///
/// log_export_start!(120, "exports/alma_export_20250101_120000.csv");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($id_count:expr, $output:expr) => {
        tracing::info!(
            id_count = $id_count,
            output = %$output,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use bibexport::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use bibexport::log_error_with_context;
/// use bibexport::domain::BibExportError;
///
/// let error = BibExportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = crate::domain::BibExportError::Other("boom".to_string());
        log_export_start!(3, "out.csv");
        log_export_complete!(3, Duration::from_millis(5));
        log_error_with_context!(&error, "while testing");
    }
}
