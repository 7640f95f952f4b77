//! Scanner module for directory traversal and metadata extraction.
//!
//! This module provides functionality for:
//! - Sequential, deterministically ordered directory walking using walkdir
//! - Per-file metadata extraction into normalized [`FileRecord`]s
//! - Symlink cycle protection when links are followed
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`extract`]: Turns a path into a [`FileRecord`] (name, extension, size, mtime)
//! - [`walker`]: Directory traversal, size filtering and error isolation
//!
//! # Example
//!
//! ```no_run
//! use folderaudit::scanner::{SizeKb, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::default().with_min_size(SizeKb::from_kb(10.0).unwrap());
//!
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} KB", file.path.display(), file.size_kb),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod extract;
pub mod walker;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::iter::Sum;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

pub use extract::{extension_of, extract, name_key_of};
pub use walker::Walker;

/// A file size in kilobytes (KiB), kept to two decimal places.
///
/// Stored as an integer count of hundredths of a kilobyte so that equal sizes
/// compare and hash exactly. Conversion from bytes rounds half-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeKb(u64);

impl SizeKb {
    /// Zero kilobytes.
    pub const ZERO: SizeKb = SizeKb(0);

    /// Convert a byte length to kilobytes, rounded half-up to two decimals.
    #[must_use]
    pub fn from_bytes(bytes: u64) -> Self {
        let centis = (u128::from(bytes) * 100 + 512) / 1024;
        Self(u64::try_from(centis).unwrap_or(u64::MAX))
    }

    /// Convert a decimal kilobyte amount, rounded to two decimals.
    ///
    /// Returns `None` for negative, NaN or infinite input.
    #[must_use]
    pub fn from_kb(kb: f64) -> Option<Self> {
        if !kb.is_finite() || kb < 0.0 {
            return None;
        }
        Some(Self((kb * 100.0).round() as u64))
    }

    /// Build from a raw count of hundredths of a kilobyte.
    #[must_use]
    pub const fn from_centis(centis: u64) -> Self {
        Self(centis)
    }

    /// Raw count of hundredths of a kilobyte.
    #[must_use]
    pub const fn centis(self) -> u64 {
        self.0
    }

    /// Kilobytes as a float.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Size in mebibytes (for breakdown display).
    #[must_use]
    pub fn as_mib(self) -> f64 {
        self.as_f64() / 1024.0
    }
}

impl fmt::Display for SizeKb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Sum for SizeKb {
    fn sum<I: Iterator<Item = SizeKb>>(iter: I) -> Self {
        Self(iter.fold(0u64, |acc, s| acc.saturating_add(s.0)))
    }
}

impl<'a> Sum<&'a SizeKb> for SizeKb {
    fn sum<I: Iterator<Item = &'a SizeKb>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for SizeKb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Name-mode duplicate key: the file stem, lower-cased when it is valid UTF-8.
///
/// Stems that are not valid UTF-8 are kept as raw bytes, so distinct names
/// never collapse into one key. The lossy form is only used for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NameKey(OsString);

impl NameKey {
    /// Build a key from a file stem.
    #[must_use]
    pub fn from_stem(stem: &OsStr) -> Self {
        match stem.to_str() {
            Some(utf8) => Self(OsString::from(utf8.to_lowercase())),
            None => Self(stem.to_os_string()),
        }
    }

    /// The key as an OS string.
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string_lossy())
    }
}

impl PartialEq<str> for NameKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NameKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalized metadata for one scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base filename including extension
    pub name: String,
    /// Path as reached from the scan root
    pub path: PathBuf,
    /// Lower-cased extension with leading dot, or empty
    pub extension: String,
    /// Raw file length in bytes
    pub size_bytes: u64,
    /// File size in kilobytes
    pub size_kb: SizeKb,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileRecord {
    /// Create a new FileRecord, deriving name and extension from the path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size_bytes` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size_bytes: u64, modified: SystemTime) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
            .into_owned();
        let extension = extension_of(&path);
        Self {
            name,
            path,
            extension,
            size_bytes,
            size_kb: SizeKb::from_bytes(size_bytes),
            modified,
        }
    }

    /// Key used for name-mode duplicate grouping (lower-cased stem).
    #[must_use]
    pub fn name_key(&self) -> NameKey {
        name_key_of(&self.path)
    }

    /// Render the modification time in local time with a strftime pattern.
    ///
    /// Falls back to RFC 3339 if the pattern cannot be rendered.
    #[must_use]
    pub fn format_modified(&self, date_format: &str) -> String {
        use std::fmt::Write;

        let datetime: DateTime<Local> = self.modified.into();
        let mut out = String::new();
        if write!(out, "{}", datetime.format(date_format)).is_err() {
            return datetime.to_rfc3339();
        }
        out
    }
}

/// Ordered records from one walk plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Records in traversal order
    pub records: Vec<FileRecord>,
    /// Recoverable per-file errors
    pub errors: Vec<AccessError>,
}

/// Configuration for directory walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Descend into subdirectories. When false only direct children of the root are visited.
    pub recursive: bool,

    /// Minimum file size to include. Smaller files are silently excluded.
    pub min_size: SizeKb,

    /// Follow symbolic links during traversal.
    /// Directory identities are tracked so cycles terminate.
    pub follow_symlinks: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            min_size: SizeKb::ZERO,
            follow_symlinks: false,
        }
    }
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `recursive` - Whether to descend into subdirectories
    /// * `min_size` - Minimum file size filter
    /// * `follow_symlinks` - Whether to follow symbolic links
    #[must_use]
    pub fn new(recursive: bool, min_size: SizeKb, follow_symlinks: bool) -> Self {
        Self {
            recursive,
            min_size,
            follow_symlinks,
        }
    }

    /// Set whether subdirectories are visited.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the minimum file size.
    #[must_use]
    pub fn with_min_size(mut self, min_size: SizeKb) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Fatal errors that abort a scan before any record is produced.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The scan root could not be inspected.
    #[error("Cannot read root directory {path}: {source}")]
    RootUnreadable {
        /// Root path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable per-file errors. The file is skipped and the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path vanished during the scan, or a symlink target is missing.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The path no longer refers to a regular file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Following a symlink would re-enter one of its own ancestors.
    #[error("Symlink loop at {path} (points back to {ancestor})")]
    Loop {
        /// Path of the looping link
        path: PathBuf,
        /// Ancestor directory it resolves to
        ancestor: PathBuf,
    },

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl AccessError {
    /// The path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path)
            | Self::NotFound(path)
            | Self::NotAFile(path)
            | Self::Loop { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}
