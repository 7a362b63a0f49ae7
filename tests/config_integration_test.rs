//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use bibexport::config::{load_config, load_config_unvalidated};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "BIBEXPORT_APPLICATION_LOG_LEVEL",
        "BIBEXPORT_ALMA_BASE_URL",
        "BIBEXPORT_ALMA_REGION",
        "BIBEXPORT_ALMA_API_KEY",
        "BIBEXPORT_ALMA_TIMEOUT_SECONDS",
        "BIBEXPORT_INPUT_IDS_FILE",
        "BIBEXPORT_INPUT_ROW_LIMIT",
        "BIBEXPORT_OUTPUT_DIRECTORY",
        "BIBEXPORT_MAPPING_RESOURCE_TYPE",
        "TEST_ALMA_API_KEY",
    ] {
        std::env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = config_file(
        r#"
[application]
log_level = "debug"

[alma]
base_url = "https://api-eu.hosted.exlibrisgroup.com/"
api_key = "l8xx-complete"
timeout_seconds = 45

[input]
ids_file = "ids.csv"
row_limit = 10

[output]
directory = "exports"
file_prefix = "gcl_export"

[mapping]
institution_code = "01TEST_INST"
resource_type = "Text"

[logging]
local_enabled = false
local_path = "/tmp/bibexport-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.alma.effective_base_url(),
        "https://api-eu.hosted.exlibrisgroup.com"
    );
    assert_eq!(
        config.alma.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "l8xx-complete"
    );
    assert_eq!(config.alma.timeout_seconds, 45);
    assert_eq!(config.input.ids_file.as_deref(), Some("ids.csv"));
    assert_eq!(config.input.row_limit, Some(10));
    assert_eq!(config.output.directory, "exports");
    assert_eq!(config.output.file_prefix, "gcl_export");
    assert_eq!(config.mapping.institution_code, "01TEST_INST");
    assert_eq!(config.mapping.resource_type.as_deref(), Some("Text"));
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = config_file("[alma]\napi_key = \"k\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.alma.region, "na");
    assert_eq!(
        config.alma.effective_base_url(),
        "https://api-na.hosted.exlibrisgroup.com"
    );
    assert_eq!(config.alma.timeout_seconds, 30);
    assert!(config.input.ids_file.is_none());
    assert_eq!(config.output.directory, ".");
    assert_eq!(config.output.file_prefix, "alma_export");
    assert_eq!(config.mapping.institution_code, "01GCL_INST");
    assert!(config.logging.local_enabled);
}

#[test]
fn test_region_selects_gateway() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = config_file("[alma]\nregion = \"cn\"\napi_key = \"k\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(
        config.alma.effective_base_url(),
        "https://api-cn.hosted.exlibrisgroup.com.cn"
    );
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_ALMA_API_KEY", "l8xx-from-env");

    let file = config_file(
        r#"
[alma]
# api_key = "${NOT_SET_ANYWHERE}"
api_key = "${TEST_ALMA_API_KEY}"
"#,
    );
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(
        config.alma.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "l8xx-from-env"
    );
}

#[test]
fn test_missing_substitution_variable_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = config_file("[alma]\napi_key = \"${TEST_ALMA_API_KEY}\"\n");
    let err = load_config(file.path()).unwrap_err();

    assert!(err.to_string().contains("TEST_ALMA_API_KEY"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("BIBEXPORT_ALMA_API_KEY", "l8xx-override");
    std::env::set_var("BIBEXPORT_ALMA_REGION", "ap");
    std::env::set_var("BIBEXPORT_INPUT_ROW_LIMIT", "7");
    std::env::set_var("BIBEXPORT_OUTPUT_DIRECTORY", "/data/exports");
    std::env::set_var("BIBEXPORT_MAPPING_RESOURCE_TYPE", "Image");

    let file = config_file("[alma]\napi_key = \"from-file\"\nregion = \"na\"\n");
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(
        config.alma.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "l8xx-override"
    );
    assert_eq!(
        config.alma.effective_base_url(),
        "https://api-ap.hosted.exlibrisgroup.com"
    );
    assert_eq!(config.input.row_limit, Some(7));
    assert_eq!(config.output.directory, "/data/exports");
    assert_eq!(config.mapping.resource_type.as_deref(), Some("Image"));
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        ("[alma]\nregion = \"na\"\n", "api_key"),
        ("[alma]\napi_key = \"k\"\nregion = \"mars\"\n", "region"),
        ("[alma]\napi_key = \"k\"\nbase_url = \"ftp://x\"\n", "base_url"),
        ("[alma]\napi_key = \"k\"\ntimeout_seconds = 0\n", "timeout_seconds"),
        ("[alma]\napi_key = \"k\"\n[input]\nrow_limit = 0\n", "row_limit"),
        ("[alma]\napi_key = \"k\"\n[application]\nlog_level = \"loud\"\n", "log_level"),
        ("[alma]\napi_key = \"k\"\n[logging]\nlocal_rotation = \"weekly\"\n", "local_rotation"),
    ];

    for (content, expected) in cases {
        let file = config_file(content);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in: {err}"
        );

        // The unvalidated loader still parses it
        assert!(load_config_unvalidated(file.path()).is_ok());
    }
}

#[test]
fn test_missing_and_malformed_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let err = load_config("/nonexistent/bibexport.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));

    let file = config_file("[alma\napi_key = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TOML"));
}
