//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the bibexport configuration file.

use crate::config::{load_config_unvalidated, BibExportConfig};
use crate::core::mapping::MappingOptions;
use clap::Args;
use secrecy::ExposeSecret;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config_unvalidated(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                for line in summary_lines(&config) {
                    println!("{line}");
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

/// Human-readable summary of a valid configuration; never shows the API key
fn summary_lines(config: &BibExportConfig) -> Vec<String> {
    let api_key_len = config
        .alma
        .api_key
        .as_ref()
        .map(|k| k.expose_secret().len())
        .unwrap_or(0);
    let options: MappingOptions = config.mapping.to_options();

    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Alma API: {}", config.alma.effective_base_url()),
        format!("  API Key: set ({api_key_len} characters)"),
        format!("  Timeout: {}s", config.alma.timeout_seconds),
    ];

    match &config.input.ids_file {
        Some(file) => {
            let status = if Path::new(file).exists() {
                "found"
            } else {
                "not found"
            };
            lines.push(format!("  Identifier File: {file} ({status})"));
        }
        None => lines.push("  Identifier File: (pass --ids-file)".to_string()),
    }
    if let Some(limit) = config.input.row_limit {
        lines.push(format!("  Row Limit: {limit}"));
    }

    lines.push(format!(
        "  Output: {}/{}_YYYYMMDD_HHMMSS.csv",
        config.output.directory.trim_end_matches('/'),
        config.output.file_prefix
    ));
    lines.push(format!("  Institution Code: {}", options.institution_code));
    lines.push(format!(
        "  DCMI Type Constant: {}",
        options.resource_type.as_deref().unwrap_or("(none)")
    ));
    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    ));

    lines
}
