//! folderaudit - Folder Inventory and Potential Duplicate Finder
//!
//! A cross-platform Rust CLI application that walks a folder, records every
//! file's size and modification time, summarizes sizes per extension and
//! groups potential duplicates by size + extension and by filename. Results
//! are written as CSV tables and a console (or JSON) summary. Scanned files are
//! never modified.

pub mod audit;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod stats;

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::audit::{AuditReport, Auditor};
use crate::cli::{Cli, Commands, InitArgs, OutputFormat, ScanArgs};
use crate::config::AuditConfig;
use crate::error::ExitCode;
use crate::output::{AuditCsv, ConsoleReport, DuplicatesCsv, JsonOutput};
use crate::progress::Progress;

/// Run the command selected on the command line.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the root cannot be
/// scanned, or a report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Scan(args) => run_scan(args, cli.quiet),
        Commands::Init(args) => run_init(args),
    }
}

fn run_scan(args: &ScanArgs, quiet: bool) -> Result<ExitCode> {
    let config = AuditConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = args.apply(config);
    log::debug!("Effective configuration: {:?}", config);

    let mut auditor = Auditor::from_config(&config).context("Invalid configuration")?;
    let show_progress = !quiet && !args.no_progress && args.output == OutputFormat::Text;
    if show_progress {
        auditor = auditor.with_progress(Arc::new(Progress::new()));
    }

    let report = auditor.run().context("Audit failed")?;

    if args.no_csv {
        log::debug!("CSV output disabled");
    } else {
        write_csv_reports(&report, &config)?;
    }

    let exit_code = if report.has_errors() {
        log::warn!("{} files could not be read and were skipped", report.errors.len());
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    };

    let mut stdout = io::stdout().lock();
    match args.output {
        OutputFormat::Text if !quiet => ConsoleReport::new(&report)
            .write_to(&mut stdout)
            .context("Failed to write console summary")?,
        OutputFormat::Text => {}
        OutputFormat::Json => JsonOutput::new(&report, &config.date_format, exit_code)
            .write_to(&mut stdout, true)
            .context("Failed to write JSON report")?,
    }

    Ok(exit_code)
}

fn write_csv_reports(report: &AuditReport, config: &AuditConfig) -> Result<()> {
    let date_format = config.date_format.as_str();

    AuditCsv::new(&report.records, date_format)
        .write_file(&config.output_csv_path)
        .context("Failed to write audit CSV")?;
    DuplicatesCsv::new(&report.size_groups, date_format)
        .write_file(&config.size_duplicates_csv_path)
        .context("Failed to write size duplicates CSV")?;
    DuplicatesCsv::new(&report.name_groups, date_format)
        .write_file(&config.name_duplicates_csv_path)
        .context("Failed to write name duplicates CSV")?;
    Ok(())
}

fn run_init(args: &InitArgs) -> Result<ExitCode> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => AuditConfig::default_path()?,
    };

    if path.exists() && !args.force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    AuditConfig::default()
        .save(&path)
        .context("Failed to write configuration")?;
    log::info!("Wrote default configuration to {}", path.display());
    println!("{}", path.display());
    Ok(ExitCode::Success)
}
