//! Report sinks for audit results.
//!
//! This module renders an [`AuditReport`](crate::audit::AuditReport) in
//! different formats:
//! - CSV tables for spreadsheets (full audit, size duplicates, name duplicates)
//! - A human-readable console summary
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use folderaudit::audit::Auditor;
//! use folderaudit::output::{AuditCsv, ConsoleReport};
//! use folderaudit::scanner::WalkerConfig;
//! use std::path::Path;
//!
//! let report = Auditor::new(Path::new("."), WalkerConfig::default()).run().unwrap();
//!
//! AuditCsv::new(&report.records, "%Y-%m-%d")
//!     .write_file(Path::new("folder_audit.csv"))
//!     .unwrap();
//! ConsoleReport::new(&report).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod console;
pub mod csv;
pub mod json;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use self::console::ConsoleReport;
pub use self::csv::{AuditCsv, DuplicatesCsv};
pub use self::json::JsonOutput;

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Error during JSON serialization.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A report file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Write a fully rendered report in one call.
fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
