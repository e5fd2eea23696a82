//! Configuration types for uadb2parquet
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Rows per chunk; one chunk becomes one Parquet row group
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Convert user-agent database CSV dumps to Parquet
#[derive(Parser, Debug, Clone)]
#[command(
    name = "uadb2parquet",
    version,
    about = "Convert WhatIsMyBrowser.com user-agent database CSV dumps to Parquet",
    long_about = "Streams a user-agent database CSV dump and writes a Snappy-compressed\n\
                  Parquet file with the fixed 39-column user-agent schema.\n\n\
                  Rows are processed in chunks of 100000, so memory stays flat no matter\n\
                  how large the dump is. Counter columns become nullable unsigned 32-bit\n\
                  integers, date columns become microsecond timestamps, and everything\n\
                  else is nullable text.",
    after_help = "EXAMPLES:\n    \
        uadb2parquet user-agent-database.csv user-agent-database.parquet\n    \
        RUST_LOG=uadb2parquet=debug uadb2parquet dump.csv dump.parquet"
)]
pub struct CliArgs {
    /// Source CSV file (user-agent database dump)
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Destination Parquet file (overwritten if it exists)
    #[arg(value_name = "PARQUET_FILE")]
    pub parquet_file: PathBuf,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Rows per chunk (and per Parquet row group)
    pub chunk_size: usize,

    /// Show progress indicator
    pub show_progress: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: true,
        }
    }
}

impl ConvertConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        // Validate output path
        if let Some(parent) = args.parquet_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidOutputPath {
                    path: args.parquet_file.clone(),
                    reason: format!("Parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        Ok(Self::default())
    }
}
