//! Domain error types
//!
//! This module defines the error hierarchy for bibexport.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main bibexport error type
///
/// This is the primary error type used throughout the application.
/// Extraction anomalies never surface here; they degrade to "no value"
/// inside the field extractor.
#[derive(Debug, Error)]
pub enum BibExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Alma API errors
    #[error("Alma error: {0}")]
    Alma(#[from] AlmaError),

    /// Identifier list errors (missing or unreadable input file)
    #[error("Identifier list error: {0}")]
    IdList(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV serialization errors on the output sink
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Alma API errors
///
/// Errors that occur when talking to the Alma Bibs API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum AlmaError {
    /// Failed to reach the API
    #[error("Failed to connect to Alma API: {0}")]
    ConnectionFailed(String),

    /// API key rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body was not a usable bibliographic record
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// No record for the requested MMS ID
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for BibExportError {
    fn from(err: std::io::Error) -> Self {
        BibExportError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for BibExportError {
    fn from(err: csv::Error) -> Self {
        BibExportError::Csv(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BibExportError {
    fn from(err: serde_json::Error) -> Self {
        BibExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BibExportError {
    fn from(err: toml::de::Error) -> Self {
        BibExportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bibexport_error_display() {
        let err = BibExportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_alma_error_conversion() {
        let alma_err = AlmaError::ConnectionFailed("Network error".to_string());
        let err: BibExportError = alma_err.into();
        assert!(matches!(err, BibExportError::Alma(_)));
    }

    #[test]
    fn test_alma_status_error_display() {
        let err = AlmaError::ClientError {
            status: 400,
            message: "bad mms id".to_string(),
        };
        assert_eq!(err.to_string(), "Client error: 400 - bad mms id");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BibExportError = io_err.into();
        assert!(matches!(err, BibExportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BibExportError = json_err.into();
        assert!(matches!(err, BibExportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BibExportError = toml_err.into();
        assert!(matches!(err, BibExportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_bibexport_error_implements_std_error() {
        let err = BibExportError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
