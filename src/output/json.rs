//! JSON output formatter for audit results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/srv/share",
//!   "files": [
//!     { "name": "a.txt", "path": "/srv/share/a.txt", "extension": ".txt",
//!       "size_bytes": 15360, "size_kb": 15.0, "modified": "2024-01-02 03:04:05" }
//!   ],
//!   "statistics": {
//!     "total_count": 1, "total_size_kb": 15.0,
//!     "mean_size_kb": 15.0, "median_size_kb": 15.0,
//!     "extensions": [{ "extension": ".txt", "count": 1, "total_size_kb": 15.0 }]
//!   },
//!   "duplicates_by_size": [{ "key": "15.00 KB .txt", "files": ["..."] }],
//!   "size_grouping": { "total_files": 1, "duplicate_groups": 0, "potential_duplicates": 0 },
//!   "duplicates_by_name": [{ "key": "a", "files": ["..."] }],
//!   "name_grouping": { "total_files": 1, "duplicate_groups": 0, "potential_duplicates": 0 },
//!   "skipped": [{ "path": "...", "error": "Permission denied: ..." }],
//!   "summary": { "scan_duration_ms": 12, "exit_code": 0, "exit_code_name": "FA000" }
//! }
//! ```
//!
//! `mean_size_kb` and `median_size_kb` are `null` for an empty scan.

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

use super::ReportError;
use crate::audit::AuditReport;
use crate::duplicates::{DuplicateGroup, GroupingStats};
use crate::error::ExitCode;
use crate::scanner::{AccessError, FileRecord, SizeKb};
use crate::stats::Statistics;

/// A single file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFile {
    /// Base filename
    pub name: String,
    /// Path as reached from the scan root
    pub path: String,
    /// Normalized extension (empty for none)
    pub extension: String,
    /// Raw length in bytes
    pub size_bytes: u64,
    /// Size in KB
    pub size_kb: SizeKb,
    /// Formatted modification time
    pub modified: String,
}

impl JsonFile {
    /// Convert a record, formatting its time with `date_format`.
    #[must_use]
    pub fn from_record(record: &FileRecord, date_format: &str) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.to_string_lossy().into_owned(),
            extension: record.extension.clone(),
            size_bytes: record.size_bytes,
            size_kb: record.size_kb,
            modified: record.format_modified(date_format),
        }
    }
}

/// A potential duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Display form of the shared key
    pub key: String,
    /// Member paths in walk order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON group from a [`DuplicateGroup`].
    #[must_use]
    pub fn from_group<K: Display>(group: &DuplicateGroup<K>) -> Self {
        Self {
            key: group.key.to_string(),
            files: group
                .files
                .iter()
                .map(|f| f.path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// A skipped file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkipped {
    /// Path that could not be read
    pub path: String,
    /// Reason it was skipped
    pub error: String,
}

impl From<&AccessError> for JsonSkipped {
    fn from(err: &AccessError) -> Self {
        Self {
            path: err.path().to_string_lossy().into_owned(),
            error: err.to_string(),
        }
    }
}

/// Run metadata in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Duration of the audit in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "FA000")
    pub exit_code_name: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned root
    pub root: String,
    /// All included files in walk order
    pub files: Vec<JsonFile>,
    /// Aggregate statistics
    pub statistics: Statistics,
    /// Groups sharing size and extension
    pub duplicates_by_size: Vec<JsonDuplicateGroup>,
    /// Counts for the size-mode grouping
    pub size_grouping: GroupingStats,
    /// Groups sharing a filename stem
    pub duplicates_by_name: Vec<JsonDuplicateGroup>,
    /// Counts for the name-mode grouping
    pub name_grouping: GroupingStats,
    /// Files that could not be read
    pub skipped: Vec<JsonSkipped>,
    /// Run metadata
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON view of a report.
    #[must_use]
    pub fn new(report: &AuditReport, date_format: &str, exit_code: ExitCode) -> Self {
        Self {
            root: report.root.to_string_lossy().into_owned(),
            files: report
                .records
                .iter()
                .map(|r| JsonFile::from_record(r, date_format))
                .collect(),
            statistics: report.statistics.clone(),
            duplicates_by_size: report
                .size_groups
                .iter()
                .map(JsonDuplicateGroup::from_group)
                .collect(),
            size_grouping: report.size_stats(),
            duplicates_by_name: report
                .name_groups
                .iter()
                .map(JsonDuplicateGroup::from_group)
                .collect(),
            name_grouping: report.name_stats(),
            skipped: report.errors.iter().map(JsonSkipped::from).collect(),
            summary: JsonSummary {
                scan_duration_ms: u64::try_from(report.scan_duration.as_millis())
                    .unwrap_or(u64::MAX),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), ReportError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
