//! Potential-duplicate grouping by cheap metadata keys.
//!
//! # Overview
//!
//! Two independent groupings are computed from the same record list:
//!
//! - **Size mode**: same size (to the hundredth of a KB) *and* same extension.
//!   Same-size files with different extensions are deliberately kept apart.
//! - **Name mode**: same filename stem, case-insensitive, extension ignored.
//!   `report.pdf` and `report.docx` are candidates regardless of size.
//!
//! Neither mode looks at content, so groups are *potential* duplicates only.
//!
//! # Ordering
//!
//! Groups are returned in the order their key was first seen during the walk,
//! and members keep walk order. Only keys shared by two or more files produce
//! a group.
//!
//! # Example
//!
//! ```
//! use folderaudit::scanner::FileRecord;
//! use folderaudit::duplicates::{group_by_name, group_by_size};
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileRecord::new(PathBuf::from("/a.txt"), 15 * 1024, SystemTime::now()),
//!     FileRecord::new(PathBuf::from("/b.txt"), 15 * 1024, SystemTime::now()),
//!     FileRecord::new(PathBuf::from("/c.log"), 15 * 1024, SystemTime::now()),
//! ];
//!
//! let by_size = group_by_size(&files);
//! assert_eq!(by_size.len(), 1);
//! assert_eq!(by_size[0].len(), 2);
//!
//! assert!(group_by_name(&files).is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::scanner::{FileRecord, NameKey, SizeKb};
use crate::stats::NO_EXTENSION_LABEL;

/// Which equivalence criterion produced a grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateMode {
    /// Same size and extension
    Size,
    /// Same filename stem
    Name,
}

impl DuplicateMode {
    /// Human-readable description of the criterion.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Size => "size + extension",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for DuplicateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Size-mode equivalence key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SizeKey {
    /// Shared size
    pub size_kb: SizeKb,
    /// Shared normalized extension
    pub extension: String,
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extension = if self.extension.is_empty() {
            NO_EXTENSION_LABEL
        } else {
            &self.extension
        };
        write!(f, "{} KB {}", self.size_kb, extension)
    }
}

impl SizeKey {
    /// Key of a record.
    #[must_use]
    pub fn of(record: &FileRecord) -> Self {
        Self {
            size_kb: record.size_kb,
            extension: record.extension.clone(),
        }
    }
}

/// Records sharing one equivalence key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<K> {
    /// The shared key
    pub key: K,
    /// Members in walk order
    pub files: Vec<FileRecord>,
}

/// Group of same size and extension.
pub type SizeGroup = DuplicateGroup<SizeKey>;

/// Group of same filename stem.
pub type NameGroup = DuplicateGroup<NameKey>;

impl<K> DuplicateGroup<K> {
    /// Create a new group.
    #[must_use]
    pub fn new(key: K, files: Vec<FileRecord>) -> Self {
        Self { key, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Counts describing one grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Total number of records considered
    pub total_files: usize,
    /// Number of groups with 2+ files
    pub duplicate_groups: usize,
    /// Number of files that belong to some group
    pub potential_duplicates: usize,
}

impl GroupingStats {
    /// Summarize groups produced from `total_files` records.
    #[must_use]
    pub fn from_groups<K>(total_files: usize, groups: &[DuplicateGroup<K>]) -> Self {
        Self {
            total_files,
            duplicate_groups: groups.len(),
            potential_duplicates: groups.iter().map(DuplicateGroup::len).sum(),
        }
    }
}

/// Group records sharing size and extension.
///
/// # Example
///
/// ```
/// use folderaudit::scanner::{FileRecord, SizeKb};
/// use folderaudit::duplicates::group_by_size;
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let files = vec![
///     FileRecord::new(PathBuf::from("/a.txt"), 2048, SystemTime::now()),
///     FileRecord::new(PathBuf::from("/b.txt"), 2048, SystemTime::now()),
///     FileRecord::new(PathBuf::from("/c.txt"), 4096, SystemTime::now()),
/// ];
///
/// let groups = group_by_size(&files);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].key.size_kb, SizeKb::from_centis(200));
/// ```
#[must_use]
pub fn group_by_size(records: &[FileRecord]) -> Vec<SizeGroup> {
    group_by_key(records, DuplicateMode::Size, SizeKey::of)
}

/// Group records sharing a filename stem, ignoring extension and case.
#[must_use]
pub fn group_by_name(records: &[FileRecord]) -> Vec<NameGroup> {
    group_by_key(records, DuplicateMode::Name, FileRecord::name_key)
}

/// Single pass over `records`, bucketing by key in first-seen order.
fn group_by_key<K, F>(records: &[FileRecord], mode: DuplicateMode, key_of: F) -> Vec<DuplicateGroup<K>>
where
    K: Eq + Hash + Clone + fmt::Display,
    F: Fn(&FileRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<DuplicateGroup<K>> = Vec::new();

    for record in records {
        let key = key_of(record);
        match index.get(&key) {
            Some(&slot) => buckets[slot].files.push(record.clone()),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(DuplicateGroup::new(key, vec![record.clone()]));
            }
        }
    }

    let unique_keys = buckets.len();
    let groups: Vec<DuplicateGroup<K>> = buckets
        .into_iter()
        .filter(|group| group.len() > 1)
        .collect();

    for group in &groups {
        log::debug!(
            "Duplicate group by {} '{}': {} files",
            mode,
            group.key,
            group.len()
        );
    }

    let stats = GroupingStats::from_groups(records.len(), &groups);
    log::info!(
        "Grouping by {}: {} files, {} distinct keys, {} groups ({} files)",
        mode,
        stats.total_files,
        unique_keys,
        stats.duplicate_groups,
        stats.potential_duplicates
    );

    groups
}
