//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BibExportConfig;
use super::secret::secret_string;
use crate::domain::errors::BibExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "bibexport.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BibExportConfig
/// 4. Applies environment variable overrides (BIBEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use bibexport::config::loader::load_config;
///
/// let config = load_config("bibexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BibExportConfig> {
    let config = load_config_unvalidated(path)?;

    config.validate().map_err(|e| {
        BibExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads and overrides configuration without validating it
///
/// Callers that patch the configuration (CLI flags) validate afterwards.
pub fn load_config_unvalidated(path: impl AsRef<Path>) -> Result<BibExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BibExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BibExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BibExportConfig = toml::from_str(&contents)
        .map_err(|e| BibExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BibExportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BibExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the BIBEXPORT_* prefix
///
/// Environment variables follow the pattern: BIBEXPORT_<SECTION>_<KEY>,
/// for example BIBEXPORT_ALMA_REGION or BIBEXPORT_INPUT_ROW_LIMIT.
/// Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut BibExportConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("BIBEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Alma overrides
    if let Ok(val) = std::env::var("BIBEXPORT_ALMA_BASE_URL") {
        config.alma.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("BIBEXPORT_ALMA_REGION") {
        config.alma.region = val;
    }
    if let Ok(val) = std::env::var("BIBEXPORT_ALMA_API_KEY") {
        config.alma.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("BIBEXPORT_ALMA_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.alma.timeout_seconds = timeout;
        }
    }

    // Input overrides
    if let Ok(val) = std::env::var("BIBEXPORT_INPUT_IDS_FILE") {
        config.input.ids_file = Some(val);
    }
    if let Ok(val) = std::env::var("BIBEXPORT_INPUT_ROW_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.input.row_limit = Some(limit);
        }
    }

    // Output overrides
    if let Ok(val) = std::env::var("BIBEXPORT_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("BIBEXPORT_OUTPUT_FILE_PREFIX") {
        config.output.file_prefix = val;
    }

    // Mapping overrides
    if let Ok(val) = std::env::var("BIBEXPORT_MAPPING_INSTITUTION_CODE") {
        config.mapping.institution_code = val;
    }
    if let Ok(val) = std::env::var("BIBEXPORT_MAPPING_RESOURCE_TYPE") {
        config.mapping.resource_type = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("BIBEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("BIBEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("BIBEXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("BIBEXPORT_LOADER_TEST_VAR", "test_value");
        let input = "api_key = \"${BIBEXPORT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("BIBEXPORT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("BIBEXPORT_LOADER_MISSING_VAR");
        let input = "api_key = \"${BIBEXPORT_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("BIBEXPORT_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("BIBEXPORT_LOADER_COMMENTED_VAR");
        let input = "# api_key = \"${BIBEXPORT_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(BibExportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[alma]
region = "eu"
api_key = "l8xx-test-key"

[input]
row_limit = 25

[mapping]
resource_type = "Text"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(
            config.alma.effective_base_url(),
            "https://api-eu.hosted.exlibrisgroup.com"
        );
        assert_eq!(
            config.alma.api_key.as_ref().unwrap().expose_secret(),
            "l8xx-test-key"
        );
        assert_eq!(config.input.row_limit, Some(25));
        assert_eq!(config.mapping.resource_type.as_deref(), Some("Text"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[alma\nregion = ").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
