//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`AuditConfig::default`])
//! 2. TOML config file (explicit path, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed `FOLDERAUDIT_` (e.g. `FOLDERAUDIT_MIN_SIZE_KB=50`)
//! 4. Command-line flags (applied by the caller)
//!
//! The resulting value is immutable for the duration of a scan.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scanner::{SizeKb, WalkerConfig};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "FOLDERAUDIT_";

/// Default strftime pattern for modification times.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default minimum file size in KB.
pub const DEFAULT_MIN_SIZE_KB: f64 = 10.0;

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// No folder to scan was given.
    #[error("No folder to scan: pass a path or set root_path in the config file")]
    MissingRoot,

    /// Minimum size is negative or not a number.
    #[error("Invalid min_size_kb {0}: must be a non-negative number")]
    InvalidMinSize(f64),

    /// The date format contains an unknown specifier.
    #[error("Invalid date_format '{0}'")]
    InvalidDateFormat(String),

    /// The platform config directory could not be determined.
    #[error("Failed to determine the configuration directory")]
    NoConfigDir,

    /// A layer could not be parsed.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// TOML serialization failed.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Reading or writing the config file failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Audit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Folder to audit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_path: Option<PathBuf>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Files smaller than this many KB are left out.
    pub min_size_kb: f64,
    /// strftime pattern for the Last Modified column.
    pub date_format: String,
    /// Full audit CSV destination.
    pub output_csv_path: PathBuf,
    /// Size-mode duplicates CSV destination.
    pub size_duplicates_csv_path: PathBuf,
    /// Name-mode duplicates CSV destination.
    pub name_duplicates_csv_path: PathBuf,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            recursive: true,
            min_size_kb: DEFAULT_MIN_SIZE_KB,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            output_csv_path: PathBuf::from("folder_audit.csv"),
            size_duplicates_csv_path: PathBuf::from("duplicates_by_size.csv"),
            name_duplicates_csv_path: PathBuf::from("duplicates_by_name.csv"),
            follow_symlinks: false,
        }
    }
}

impl AuditConfig {
    /// Load defaults, then the config file, then `FOLDERAUDIT_*` variables.
    ///
    /// With `config_file` set, that file is used; otherwise the platform default
    /// path is tried. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a layer is malformed.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().ok(),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        Ok(figment.extract()?)
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if no home directory is known.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let project_dirs = ProjectDirs::from("com", "folderaudit", "folderaudit")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)?;
        Ok(())
    }

    /// Check values that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMinSize`] or [`ConfigError::InvalidDateFormat`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.min_size()?;
        validate_date_format(&self.date_format)
    }

    /// The minimum size as a [`SizeKb`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMinSize`] for negative or non-finite values.
    pub fn min_size(&self) -> Result<SizeKb, ConfigError> {
        SizeKb::from_kb(self.min_size_kb).ok_or(ConfigError::InvalidMinSize(self.min_size_kb))
    }

    /// Walker settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMinSize`] for an unusable minimum size.
    pub fn walker_config(&self) -> Result<WalkerConfig, ConfigError> {
        Ok(WalkerConfig::new(
            self.recursive,
            self.min_size()?,
            self.follow_symlinks,
        ))
    }
}

/// Reject strftime patterns chrono cannot render.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDateFormat`] if any specifier is unknown.
pub fn validate_date_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}
