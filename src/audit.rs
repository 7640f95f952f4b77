//! Audit orchestration: walk, aggregate, group.
//!
//! # Overview
//!
//! [`Auditor::run`] drives one complete audit:
//! 1. **Walk**: validate the root and collect every [`FileRecord`] (see [`crate::scanner`])
//! 2. **Aggregate**: compute [`Statistics`] over all records
//! 3. **Group**: build size-mode and name-mode potential duplicate groups
//!
//! Everything is materialized in an [`AuditReport`] before any output is written.
//!
//! # Example
//!
//! ```no_run
//! use folderaudit::audit::Auditor;
//! use folderaudit::scanner::WalkerConfig;
//! use std::path::Path;
//!
//! let auditor = Auditor::new(Path::new("."), WalkerConfig::default());
//! let report = auditor.run().unwrap();
//! println!("{} files, {} size groups", report.statistics.total_count, report.size_groups.len());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{AuditConfig, ConfigError};
use crate::duplicates::{group_by_name, group_by_size, GroupingStats, NameGroup, SizeGroup};
use crate::progress::ProgressCallback;
use crate::scanner::{AccessError, FileRecord, ScanError, Walker, WalkerConfig};
use crate::stats::{aggregate, Statistics};

/// Everything one audit produced.
#[derive(Debug)]
pub struct AuditReport {
    /// Root that was scanned
    pub root: PathBuf,
    /// Records in walk order
    pub records: Vec<FileRecord>,
    /// Files skipped because they could not be read
    pub errors: Vec<AccessError>,
    /// Summary statistics
    pub statistics: Statistics,
    /// Groups sharing size and extension
    pub size_groups: Vec<SizeGroup>,
    /// Groups sharing a filename stem
    pub name_groups: Vec<NameGroup>,
    /// Wall time of the whole audit
    pub scan_duration: Duration,
}

impl AuditReport {
    /// Whether any file had to be skipped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Counts for the size-mode grouping.
    #[must_use]
    pub fn size_stats(&self) -> GroupingStats {
        GroupingStats::from_groups(self.records.len(), &self.size_groups)
    }

    /// Counts for the name-mode grouping.
    #[must_use]
    pub fn name_stats(&self) -> GroupingStats {
        GroupingStats::from_groups(self.records.len(), &self.name_groups)
    }
}

/// Runs audits of one root with a fixed walker configuration.
pub struct Auditor {
    root: PathBuf,
    walker_config: WalkerConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auditor")
            .field("root", &self.root)
            .field("walker_config", &self.walker_config)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Auditor {
    /// Create an auditor for `root`.
    #[must_use]
    pub fn new(root: &Path, walker_config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            walker_config,
            progress: None,
        }
    }

    /// Create an auditor from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid or names no root.
    pub fn from_config(config: &AuditConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let root = config.root_path.as_deref().ok_or(ConfigError::MissingRoot)?;
        Ok(Self::new(root, config.walker_config()?))
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Run the audit.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root is missing or not a directory. Per-file
    /// failures never abort the run; they are listed in [`AuditReport::errors`].
    pub fn run(&self) -> Result<AuditReport, ScanError> {
        let start = Instant::now();
        log::info!("Auditing {}", self.root.display());

        let mut walker = Walker::new(&self.root, self.walker_config.clone());
        if let Some(progress) = &self.progress {
            walker = walker.with_progress(Arc::clone(progress));
        }
        let scan = walker.scan()?;

        let statistics = aggregate(&scan.records);
        let size_groups = group_by_size(&scan.records);
        let name_groups = group_by_name(&scan.records);

        let scan_duration = start.elapsed();
        log::info!(
            "Audit complete in {:.2?}: {} files, {} size groups, {} name groups, {} skipped",
            scan_duration,
            statistics.total_count,
            size_groups.len(),
            name_groups.len(),
            scan.errors.len()
        );

        Ok(AuditReport {
            root: self.root.clone(),
            records: scan.records,
            errors: scan.errors,
            statistics,
            size_groups,
            name_groups,
            scan_duration,
        })
    }
}
