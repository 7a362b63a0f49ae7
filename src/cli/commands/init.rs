//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing bibexport configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with ALMA_API_KEY=<your Bibs API key>");
                println!("  3. Validate configuration: bibexport validate-config");
                println!("  4. Run export: bibexport export --ids-file mms_ids.csv");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn generate_config() -> String {
        r#"# bibexport Configuration File
# Alma bibliographic records to Dublin Core CSV

[application]
# trace | debug | info | warn | error
log_level = "info"

[alma]
# Regional API gateway: na | eu | ap | ca | cn
region = "na"
# Explicit gateway URL; overrides region when set
# base_url = "https://api-na.hosted.exlibrisgroup.com"

# Bibs API key (read-only is enough)
api_key = "${ALMA_API_KEY}"

# Request timeout in seconds
timeout_seconds = 30

[input]
# CSV of MMS IDs; the column whose header mentions "mms" and "id" is used,
# otherwise the first column. Lines starting with '#' are skipped.
# ids_file = "mms_ids.csv"

# Process only the first N identifiers (useful for test runs)
# row_limit = 10

[output]
# Directory for export files
directory = "."

# Files are named <file_prefix>_YYYYMMDD_HHMMSS.csv
file_prefix = "alma_export"

[mapping]
# Institution code of the local Dublin Core namespace
# (http://alma.exlibrisgroup.com/dc/<code>) when a record has no
# originating system
institution_code = "01GCL_INST"

# Value for dcterms:type.dcterms:DCMIType when a record has none;
# remove to leave the column empty
resource_type = "Text"

[logging]
# JSON log files in addition to console output
local_enabled = true
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
