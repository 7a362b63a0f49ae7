//! Configuration schema types
//!
//! Every section has serde defaults, so an empty file parses; `validate()`
//! then reports what an export still needs.

use crate::config::SecretString;
use crate::core::mapping::MappingOptions;
use serde::{Deserialize, Serialize};

/// Regional Alma API gateways
pub const ALMA_REGIONS: [(&str, &str); 5] = [
    ("na", "https://api-na.hosted.exlibrisgroup.com"),
    ("eu", "https://api-eu.hosted.exlibrisgroup.com"),
    ("ap", "https://api-ap.hosted.exlibrisgroup.com"),
    ("ca", "https://api-ca.hosted.exlibrisgroup.com"),
    ("cn", "https://api-cn.hosted.exlibrisgroup.com.cn"),
];

/// Main bibexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Alma API connection
    #[serde(default)]
    pub alma: AlmaConfig,

    /// Identifier list input
    #[serde(default)]
    pub input: InputConfig,

    /// CSV output
    #[serde(default)]
    pub output: OutputConfig,

    /// Column mapping parameters
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BibExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.alma.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.mapping.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Alma API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlmaConfig {
    /// Explicit API base URL; overrides `region`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Regional gateway (na, eu, ap, ca, cn)
    #[serde(default = "default_region")]
    pub region: String,

    /// API key, sent as `Authorization: apikey <key>`
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl AlmaConfig {
    /// Base URL actually used for requests
    pub fn effective_base_url(&self) -> String {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.trim_end_matches('/').to_string();
        }
        region_base_url(&self.region)
            .unwrap_or(ALMA_REGIONS[0].1)
            .to_string()
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("alma.base_url must start with http:// or https://".to_string());
            }
        } else if region_base_url(&self.region).is_none() {
            let regions: Vec<&str> = ALMA_REGIONS.iter().map(|(code, _)| *code).collect();
            return Err(format!(
                "Invalid alma.region '{}'. Must be one of: {}",
                self.region,
                regions.join(", ")
            ));
        }

        if self
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err(
                "alma.api_key cannot be empty (set it directly or via ${ALMA_API_KEY})"
                    .to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("alma.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for AlmaConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            region: default_region(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Base URL of a regional gateway
pub fn region_base_url(region: &str) -> Option<&'static str> {
    let region = region.to_lowercase();
    ALMA_REGIONS
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, url)| *url)
}

/// Identifier list input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file of MMS IDs
    #[serde(default)]
    pub ids_file: Option<String>,

    /// Process only the first N identifiers
    #[serde(default)]
    pub row_limit: Option<usize>,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.row_limit == Some(0) {
            return Err("input.row_limit must be > 0 when set".to_string());
        }
        if self.ids_file.as_deref().map(str::is_empty).unwrap_or(false) {
            return Err("input.ids_file cannot be empty when set".to_string());
        }
        Ok(())
    }
}

/// CSV output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the export file is written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name prefix; a `_YYYYMMDD_HHMMSS.csv` suffix is appended
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        if self.file_prefix.is_empty() {
            return Err("output.file_prefix cannot be empty".to_string());
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err("output.file_prefix cannot contain path separators".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Column mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Institution code used for the custom namespace when a record has
    /// no `originating_system`
    #[serde(default = "default_institution_code")]
    pub institution_code: String,

    /// Constant for the DCMI type column when a record has none
    #[serde(default)]
    pub resource_type: Option<String>,
}

impl MappingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.institution_code.trim().is_empty() {
            return Err("mapping.institution_code cannot be empty".to_string());
        }
        Ok(())
    }

    /// Options for the row mapper
    pub fn to_options(&self) -> MappingOptions {
        MappingOptions {
            institution_code: self.institution_code.trim().to_string(),
            resource_type: self
                .resource_type
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            institution_code: default_institution_code(),
            resource_type: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "na".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    crate::core::export::writer::DEFAULT_FILE_PREFIX.to_string()
}

fn default_institution_code() -> String {
    crate::core::mapping::DEFAULT_INSTITUTION_CODE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
