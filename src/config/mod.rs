//! Configuration management for bibexport.
//!
//! # Overview
//!
//! bibexport uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `BIBEXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation per section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bibexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bibexport.toml")?;
//!
//! println!("Alma API: {}", config.alma.effective_base_url());
//! println!("Output directory: {}", config.output.directory);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`AlmaConfig`] - API gateway, key, timeout
//! - [`InputConfig`] - Identifier list and row limit
//! - [`OutputConfig`] - Output directory and file prefix
//! - [`MappingConfig`] - Institution code and resource-type constant
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [alma]
//! region = "na"
//! api_key = "${ALMA_API_KEY}"
//!
//! [input]
//! ids_file = "mms_ids.csv"
//!
//! [output]
//! directory = "exports"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_unvalidated, DEFAULT_CONFIG_FILE};
pub use schema::{
    AlmaConfig, ApplicationConfig, BibExportConfig, InputConfig, LoggingConfig, MappingConfig,
    OutputConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
