//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for bibexport using clap.

pub mod commands;

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

/// bibexport - Alma bibliographic records to Dublin Core CSV
#[derive(Parser, Debug)]
#[command(name = "bibexport")]
#[command(version, about, long_about = None)]
#[command(author = "Bibexport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "BIBEXPORT_CONFIG", global = true)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BIBEXPORT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch records for a list of MMS IDs and write the CSV export
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
