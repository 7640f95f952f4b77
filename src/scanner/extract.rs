//! Per-file metadata extraction.
//!
//! Reads filesystem metadata only; file contents are never opened.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use super::{AccessError, FileRecord, NameKey};

/// Extract a [`FileRecord`] for a path expected to be a regular file.
///
/// # Arguments
///
/// * `path` - Path to the file
/// * `follow_symlinks` - Resolve symlinks before reading metadata
///
/// # Errors
///
/// Returns [`AccessError`] when metadata cannot be read (permission denied,
/// broken link, file removed mid-scan) or the path is no longer a regular file.
pub fn extract(path: &Path, follow_symlinks: bool) -> Result<FileRecord, AccessError> {
    let metadata = if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    }
    .map_err(|e| classify_io_error(path, e))?;

    if !metadata.is_file() {
        return Err(AccessError::NotAFile(path.to_path_buf()));
    }

    let modified = metadata.modified().unwrap_or_else(|e| {
        log::debug!(
            "No modification time for {} ({}), using epoch",
            path.display(),
            e
        );
        SystemTime::UNIX_EPOCH
    });

    Ok(FileRecord::new(path.to_path_buf(), metadata.len(), modified))
}

/// Lower-cased extension including the leading dot.
///
/// `archive.tar.GZ` -> `.gz`; `README`, `name.` and `.bashrc` -> empty.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => String::new(),
    }
}

/// Lower-cased filename with its final extension removed.
///
/// This is the name-mode duplicate key, so `report.pdf` and `Report.docx`
/// both map to `report`.
#[must_use]
pub fn name_key_of(path: &Path) -> NameKey {
    path.file_stem().map(NameKey::from_stem).unwrap_or_default()
}

/// Map an I/O error to the matching [`AccessError`] and log it.
pub(crate) fn classify_io_error(path: &Path, error: std::io::Error) -> AccessError {
    match error.kind() {
        ErrorKind::PermissionDenied => {
            log::warn!("Permission denied: {}", path.display());
            AccessError::PermissionDenied(path.to_path_buf())
        }
        ErrorKind::NotFound => {
            log::debug!("File not found (may have been deleted): {}", path.display());
            AccessError::NotFound(path.to_path_buf())
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            AccessError::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}
