//! Export command implementation
//!
//! This module implements the `export` command: read MMS IDs, fetch the
//! records from Alma and write the CSV export.

use crate::config::{load_config_unvalidated, BibExportConfig};
use crate::core::export::{ExportCoordinator, ExportRequest};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Failed identifiers listed in the summary
const MAX_FAILURES_SHOWN: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// CSV file of MMS IDs (overrides input.ids_file)
    #[arg(short, long, value_name = "FILE")]
    pub ids_file: Option<String>,

    /// Output CSV file (default: <output.directory>/<file_prefix>_YYYYMMDD_HHMMSS.csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Process only the first N identifiers (overrides input.row_limit)
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

impl ExportArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply_overrides(&self, config: &mut BibExportConfig) {
        if let Some(ids_file) = &self.ids_file {
            tracing::info!(ids_file = %ids_file, "Overriding identifier file from CLI");
            config.input.ids_file = Some(ids_file.clone());
        }

        if let Some(limit) = self.limit {
            tracing::info!(limit, "Overriding row limit from CLI");
            config.input.row_limit = Some(limit);
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config_unvalidated(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        let mut request = match ExportRequest::from_config(&config, &chrono::Local::now()) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };
        if let Some(output) = &self.output {
            request.output_path = output.clone();
        }

        // Create export coordinator
        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(&config) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let ids = match coordinator.load_ids(&request) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read identifier list");
                eprintln!("Failed to read identifier list: {e}");
                return Ok(2);
            }
        };

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Alma API: {}", config.alma.effective_base_url());
            println!("  Identifier file: {}", request.ids_file.display());
            println!("  Records to fetch: {}", ids.len());
            if let Some(limit) = request.row_limit {
                println!("  Row limit: {limit}");
            }
            println!("  Output file: {}", request.output_path.display());
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        tracing::info!("Executing export");
        println!("🚀 Starting export of {} records...", ids.len());
        println!();

        let summary = match coordinator.export_ids(&ids, &request.output_path).await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Identifiers: {}", summary.total_ids);
        println!("  Retrieved: {}", summary.retrieved_records);
        println!("  Failed: {}", summary.failed_records());
        println!("  Active rows: {}", summary.active_records);
        println!("  Deleted markers: {}", summary.deleted_records);
        if let Some(path) = &summary.output_path {
            println!("  Output: {} ({} bytes)", path.display(), summary.file_size_bytes);
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.failures.is_empty() {
            println!("⚠️  Records not retrieved:");
            for failure in summary.failures.iter().take(MAX_FAILURES_SHOWN) {
                println!("  - {}: {}", failure.mms_id, failure.message);
            }
            if summary.failures.len() > MAX_FAILURES_SHOWN {
                println!(
                    "  ... and {} more",
                    summary.failures.len() - MAX_FAILURES_SHOWN
                );
            }
            println!();
        }

        let exit_code = summary.exit_code();
        if exit_code == 0 {
            println!("✅ Export completed successfully!");
        } else {
            println!("⚠️  Export completed with failures");
        }

        Ok(exit_code)
    }
}
