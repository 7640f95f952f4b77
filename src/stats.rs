//! Aggregate statistics over a completed scan.
//!
//! # Example
//!
//! ```
//! use folderaudit::scanner::FileRecord;
//! use folderaudit::stats::aggregate;
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let records: Vec<FileRecord> = [10u64, 20, 30]
//!     .iter()
//!     .map(|kb| FileRecord::new(PathBuf::from(format!("/f{kb}.txt")), kb * 1024, SystemTime::now()))
//!     .collect();
//!
//! let stats = aggregate(&records);
//! assert_eq!(stats.total_count, 3);
//! assert_eq!(stats.mean_size_kb, Some(20.0));
//! assert_eq!(stats.median_size_kb, Some(20.0));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::scanner::{FileRecord, SizeKb};

/// Label used for files without an extension.
pub const NO_EXTENSION_LABEL: &str = "(no extension)";

/// Count and total size for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    /// Normalized extension (empty for none)
    pub extension: String,
    /// Number of files with this extension
    pub count: usize,
    /// Combined size of those files
    pub total_size_kb: SizeKb,
}

impl ExtensionStats {
    /// Display label, substituting a placeholder for the empty extension.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.extension.is_empty() {
            NO_EXTENSION_LABEL
        } else {
            &self.extension
        }
    }
}

/// Summary statistics for one scan.
///
/// `mean_size_kb` and `median_size_kb` are `None` when no file was collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of records
    pub total_count: usize,
    /// Sum of all record sizes
    pub total_size_kb: SizeKb,
    /// Arithmetic mean size
    pub mean_size_kb: Option<f64>,
    /// Median size
    pub median_size_kb: Option<f64>,
    /// Per-extension breakdown, ordered alphabetically by extension
    pub extensions: Vec<ExtensionStats>,
}

/// Compute count, total, mean, median and per-extension breakdown.
#[must_use]
pub fn aggregate(records: &[FileRecord]) -> Statistics {
    let total_count = records.len();
    let total_size_kb: SizeKb = records.iter().map(|r| r.size_kb).sum();

    let mean_size_kb = if total_count == 0 {
        None
    } else {
        Some(total_size_kb.as_f64() / total_count as f64)
    };

    let mut sizes: Vec<SizeKb> = records.iter().map(|r| r.size_kb).collect();
    let median_size_kb = median(&mut sizes);

    let mut by_extension: BTreeMap<&str, (usize, SizeKb)> = BTreeMap::new();
    for record in records {
        let entry = by_extension
            .entry(record.extension.as_str())
            .or_insert((0, SizeKb::ZERO));
        entry.0 += 1;
        entry.1 = SizeKb::from_centis(entry.1.centis().saturating_add(record.size_kb.centis()));
    }

    let extensions = by_extension
        .into_iter()
        .map(|(extension, (count, total_size_kb))| ExtensionStats {
            extension: extension.to_string(),
            count,
            total_size_kb,
        })
        .collect();

    log::debug!(
        "Aggregated {} files, {} KB total",
        total_count,
        total_size_kb
    );

    Statistics {
        total_count,
        total_size_kb,
        mean_size_kb,
        median_size_kb,
        extensions,
    }
}

/// Median of a set of sizes in kilobytes.
///
/// Sorts the slice in place. For an even count the two middle values are
/// averaged. Returns `None` for an empty slice.
#[must_use]
pub fn median(sizes: &mut [SizeKb]) -> Option<f64> {
    if sizes.is_empty() {
        return None;
    }
    sizes.sort();

    let mid = sizes.len() / 2;
    let centis = if sizes.len() % 2 == 1 {
        sizes[mid].centis() as f64
    } else {
        (sizes[mid - 1].centis() as f64 + sizes[mid].centis() as f64) / 2.0
    };
    Some(centis / 100.0)
}
