//! Structured error handling and exit codes.

use serde::Serialize;

use crate::config::ConfigError;
use crate::scanner::ScanError;

/// Exit codes for the folderaudit application.
///
/// - 0: Success (audit completed, every file was readable)
/// - 1: General error (unexpected failure, e.g. a report could not be written)
/// - 2: Invalid input (root missing or not a directory, bad configuration)
/// - 3: Partial success (audit completed but some files were skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Audit completed without skipped files.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid input: The root or configuration was rejected before scanning.
    InvalidInput = 2,
    /// Partial success: Audit completed but some files could not be read.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FA000",
            Self::GeneralError => "FA001",
            Self::InvalidInput => "FA002",
            Self::PartialSuccess => "FA003",
        }
    }

    /// Choose the exit code for an error that reached the top level.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let invalid_input = err.chain().any(|cause| {
            cause.downcast_ref::<ScanError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
        });
        if invalid_input {
            Self::InvalidInput
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FA001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
