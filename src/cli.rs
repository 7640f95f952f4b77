//! Command-line interface definitions for folderaudit.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options control verbosity and color; subcommands select the operation.
//!
//! # Example
//!
//! ```bash
//! # Audit a folder recursively, writing the three CSV reports
//! folderaudit scan ~/Documents
//!
//! # Only the top level, files of at least 1 MB
//! folderaudit scan ~/Downloads --shallow --min-size 1MB
//!
//! # JSON report on stdout, no CSV files
//! folderaudit scan ~/Downloads --output json --no-csv
//!
//! # Write a default configuration file
//! folderaudit init
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AuditConfig;

/// Folder audit: file inventory, size statistics and potential duplicates.
///
/// folderaudit lists every file in a folder with its size and modification
/// time, summarizes sizes per extension and flags files that may be
/// duplicates (same size and extension, or same name). Nothing is modified.
#[derive(Debug, Parser)]
#[command(name = "folderaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON objects
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Audit a folder and write the reports
    Scan(ScanArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Folder to audit (overrides root_path from the config file)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only audit the top-level folder, not its subdirectories
    #[arg(long)]
    pub shallow: bool,

    /// Minimum file size to include (e.g., 10, 512KB, 1MB)
    ///
    /// Plain numbers are kilobytes. Supports suffixes: B, K, KB, KiB, M, MB, MiB, G, GB, GiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size_kb)]
    pub min_size: Option<f64>,

    /// strftime pattern for the Last Modified column
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Destination of the full audit CSV
    #[arg(long = "csv", value_name = "PATH")]
    pub output_csv: Option<PathBuf>,

    /// Destination of the size + extension duplicates CSV
    #[arg(long, value_name = "PATH")]
    pub size_dupes_csv: Option<PathBuf>,

    /// Destination of the name duplicates CSV
    #[arg(long, value_name = "PATH")]
    pub name_dupes_csv: Option<PathBuf>,

    /// Follow symbolic links (each real directory is still visited once)
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Console output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Do not write CSV files
    #[arg(long)]
    pub no_csv: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

impl ScanArgs {
    /// Overlay the flags that were given on top of a loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: AuditConfig) -> AuditConfig {
        if let Some(path) = &self.path {
            config.root_path = Some(path.clone());
        }
        if self.shallow {
            config.recursive = false;
        }
        if let Some(min_size) = self.min_size {
            config.min_size_kb = min_size;
        }
        if let Some(format) = &self.date_format {
            config.date_format = format.clone();
        }
        if let Some(path) = &self.output_csv {
            config.output_csv_path = path.clone();
        }
        if let Some(path) = &self.size_dupes_csv {
            config.size_duplicates_csv_path = path.clone();
        }
        if let Some(path) = &self.name_dupes_csv {
            config.name_duplicates_csv_path = path.clone();
        }
        if self.follow_symlinks {
            config.follow_symlinks = true;
        }
        config
    }
}

/// Arguments for the init subcommand.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the file (default: platform config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and duplicate listings
    Text,
    /// Full report as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into kilobytes (1 KB = 1024 bytes).
///
/// Case-insensitive. Numbers without suffix are kilobytes.
///
/// # Examples
///
/// ```
/// use folderaudit::cli::parse_size_kb;
///
/// assert_eq!(parse_size_kb("10").unwrap(), 10.0);
/// assert_eq!(parse_size_kb("512KB").unwrap(), 512.0);
/// assert_eq!(parse_size_kb("1MB").unwrap(), 1024.0);
/// assert_eq!(parse_size_kb("2048B").unwrap(), 2.0);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size_kb(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: f64 = match suffix.as_str() {
        "B" => 1.0 / 1024.0,
        "" | "K" | "KB" | "KIB" => 1.0,
        "M" | "MB" | "MIB" => 1024.0,
        "G" | "GB" | "GIB" => 1024.0 * 1024.0,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok(num * multiplier)
}
