//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting a [`FileRecord`] for every regular file.
//! Traversal is single-threaded and entries of each directory are visited in
//! filename order, so two walks of an unchanged tree yield identical sequences.
//!
//! # Features
//!
//! - Recursive or shallow (direct children only) traversal
//! - Minimum size filtering
//! - Symlinked files are read through their target; symlinked directories
//!   are entered only when following is enabled, with cycle protection
//! - Per-file error isolation: unreadable entries are reported, not fatal
//!
//! # Example
//!
//! ```no_run
//! use folderaudit::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Documents"), WalkerConfig::default());
//! let result = walker.scan().unwrap();
//! println!("{} files, {} skipped", result.records.len(), result.errors.len());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use super::extract::{classify_io_error, extract};
use super::{AccessError, FileRecord, ScanError, ScanResult, WalkerConfig};
use crate::progress::{ProgressCallback, PHASE_WALK};

/// Directory walker for sequential file discovery.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress reporting
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            progress: None,
        }
    }

    /// Attach a progress callback, notified once per collected record.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`], [`ScanError::NotADirectory`] or
    /// [`ScanError::RootUnreadable`].
    pub fn validate_root(&self) -> Result<(), ScanError> {
        match fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ScanError::RootNotFound(self.root.clone()))
            }
            Err(e) => Err(ScanError::RootUnreadable {
                path: self.root.clone(),
                source: e,
            }),
        }
    }

    /// Walk the tree and materialize every record and skipped file.
    ///
    /// # Errors
    ///
    /// Fails only when the root is missing or not a directory; nothing is
    /// collected in that case.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        self.validate_root()?;

        if let Some(progress) = &self.progress {
            progress.on_phase_start(PHASE_WALK, 0);
        }

        let mut result = ScanResult::default();
        for entry in self.walk() {
            match entry {
                Ok(record) => {
                    if let Some(progress) = &self.progress {
                        progress.on_progress(
                            result.records.len() + 1,
                            &record.path.to_string_lossy(),
                        );
                    }
                    result.records.push(record);
                }
                Err(e) => result.errors.push(e),
            }
        }

        if let Some(progress) = &self.progress {
            progress.on_phase_end(PHASE_WALK);
        }

        log::info!(
            "Walk complete: {} files collected, {} skipped",
            result.records.len(),
            result.errors.len()
        );

        Ok(result)
    }

    /// Walk the directory tree, yielding file records.
    ///
    /// Returns an iterator over [`FileRecord`] results. Errors are yielded
    /// as [`AccessError`] values rather than stopping iteration. Files below
    /// the minimum size are dropped without an error. The root itself is not
    /// validated here; use [`Walker::scan`] for that.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileRecord, AccessError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if !self.config.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        let mut entries = walk_dir.into_iter();
        let mut visited_dirs: HashSet<PathBuf> = HashSet::new();

        std::iter::from_fn(move || loop {
            let entry = match entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(self.handle_walk_error(e))),
            };

            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                // Each real directory is entered at most once
                if self.config.follow_symlinks && !self.first_visit(&mut visited_dirs, path) {
                    log::debug!("Directory already visited, skipping: {}", path.display());
                    entries.skip_current_dir();
                }
                continue;
            }

            // Unfollowed links to files are read through; linked directories are not entered
            let file_link = entry.path_is_symlink() && !self.config.follow_symlinks;
            if file_link {
                match fs::metadata(path) {
                    Ok(target) if target.is_dir() => {
                        log::trace!("Skipping directory symlink: {}", path.display());
                        continue;
                    }
                    Ok(target) if !target.is_file() => {
                        log::trace!("Skipping symlink to special file: {}", path.display());
                        continue;
                    }
                    // Broken links fall through and are reported by extract
                    _ => {}
                }
            } else if !file_type.is_file() {
                log::trace!("Skipping special file: {}", path.display());
                continue;
            }

            match extract(path, self.config.follow_symlinks || file_link) {
                Ok(record) if record.size_kb < self.config.min_size => {
                    log::trace!(
                        "Skipping file below minimum size ({} KB): {}",
                        record.size_kb,
                        path.display()
                    );
                }
                Ok(record) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        })
    }

    /// Record a directory's canonical identity; false if it was seen before.
    fn first_visit(&self, visited: &mut HashSet<PathBuf>, dir: &Path) -> bool {
        match fs::canonicalize(dir) {
            Ok(canonical) => visited.insert(canonical),
            Err(e) => {
                // Let walkdir report the read failure when it opens the directory
                log::debug!("Cannot canonicalize {}: {}", dir.display(), e);
                true
            }
        }
    }

    /// Handle walkdir errors.
    fn handle_walk_error(&self, error: walkdir::Error) -> AccessError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor().map(Path::to_path_buf) {
            log::warn!(
                "Symlink loop at {} (points back to {})",
                path.display(),
                ancestor.display()
            );
            return AccessError::Loop { path, ancestor };
        }

        let message = error.to_string();
        match error.into_io_error() {
            Some(io_error) => classify_io_error(&path, io_error),
            None => {
                log::warn!("Walker error for {}: {}", path.display(), message);
                AccessError::Io {
                    path,
                    source: std::io::Error::other(message),
                }
            }
        }
    }
}
