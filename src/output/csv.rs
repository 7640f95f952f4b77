//! CSV tables for audit results.
//!
//! Three tables are produced, all UTF-8 and comma-delimited with a header row
//! (written even when there are no rows):
//!
//! - Full audit: `Filename,Path,Extension,Size (KB),Last Modified`, one row per file
//! - Size duplicates and name duplicates:
//!   `Duplicate Group,Filename,Path,Extension,Size (KB),Last Modified`, one
//!   row per group member. The group column holds the shared key
//!   (`15.00 KB .txt` or `report`) so rows of one group sort together.
//!
//! Sizes are written with two decimals; modification times use the
//! configured strftime pattern.
//!
//! # Example
//!
//! ```
//! use folderaudit::duplicates::group_by_size;
//! use folderaudit::output::csv::DuplicatesCsv;
//! use folderaudit::scanner::FileRecord;
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileRecord::new(PathBuf::from("a.txt"), 15 * 1024, SystemTime::now()),
//!     FileRecord::new(PathBuf::from("b.txt"), 15 * 1024, SystemTime::now()),
//! ];
//! let groups = group_by_size(&files);
//!
//! let csv = DuplicatesCsv::new(&groups, "%Y-%m-%d").to_string().unwrap();
//! assert!(csv.contains("15.00 KB .txt,a.txt,a.txt,.txt,15.00,"));
//! ```

use std::fmt::Display;
use std::io;
use std::path::Path;

use serde::Serialize;

use super::{write_report, ReportError};
use crate::duplicates::DuplicateGroup;
use crate::scanner::FileRecord;

/// Header of the full audit table.
pub const AUDIT_HEADER: [&str; 5] = ["Filename", "Path", "Extension", "Size (KB)", "Last Modified"];

/// Header of both duplicate tables.
pub const DUPLICATES_HEADER: [&str; 6] = [
    "Duplicate Group",
    "Filename",
    "Path",
    "Extension",
    "Size (KB)",
    "Last Modified",
];

/// A single row of the full audit table.
#[derive(Debug, Serialize)]
struct AuditRow<'a> {
    name: &'a str,
    path: String,
    extension: &'a str,
    size_kb: String,
    modified: String,
}

impl<'a> AuditRow<'a> {
    fn new(record: &'a FileRecord, date_format: &str) -> Self {
        Self {
            name: &record.name,
            path: record.path.to_string_lossy().into_owned(),
            extension: &record.extension,
            size_kb: record.size_kb.to_string(),
            modified: record.format_modified(date_format),
        }
    }
}

/// A single row of a duplicates table.
#[derive(Debug, Serialize)]
struct DuplicateRow<'a> {
    group: String,
    name: &'a str,
    path: String,
    extension: &'a str,
    size_kb: String,
    modified: String,
}

/// Full audit table writer.
pub struct AuditCsv<'a> {
    records: &'a [FileRecord],
    date_format: &'a str,
}

impl<'a> AuditCsv<'a> {
    /// Create a writer for `records`, rendering times with `date_format`.
    #[must_use]
    pub fn new(records: &'a [FileRecord], date_format: &'a str) -> Self {
        Self {
            records,
            date_format,
        }
    }

    /// Write the table to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(AUDIT_HEADER)?;

        for record in self.records {
            csv_writer.serialize(AuditRow::new(record, self.date_format))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the table as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if serialization fails.
    pub fn to_string(&self) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Render the table and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if rendering or writing fails.
    pub fn write_file(&self, path: &Path) -> Result<(), ReportError> {
        write_report(path, &self.to_string()?)
    }
}

/// Duplicates table writer for either grouping mode.
pub struct DuplicatesCsv<'a, K> {
    groups: &'a [DuplicateGroup<K>],
    date_format: &'a str,
}

impl<'a, K: Display> DuplicatesCsv<'a, K> {
    /// Create a writer for `groups`, rendering times with `date_format`.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup<K>], date_format: &'a str) -> Self {
        Self {
            groups,
            date_format,
        }
    }

    /// Write the table to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(DUPLICATES_HEADER)?;

        for group in self.groups {
            let key = group.key.to_string();
            for record in &group.files {
                let row = DuplicateRow {
                    group: key.clone(),
                    name: &record.name,
                    path: record.path.to_string_lossy().into_owned(),
                    extension: &record.extension,
                    size_kb: record.size_kb.to_string(),
                    modified: record.format_modified(self.date_format),
                };
                csv_writer.serialize(row)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the table as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if serialization fails.
    pub fn to_string(&self) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Render the table and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if rendering or writing fails.
    pub fn write_file(&self, path: &Path) -> Result<(), ReportError> {
        write_report(path, &self.to_string()?)
    }
}
