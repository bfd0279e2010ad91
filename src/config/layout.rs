//! On-disk layout of the devsync state directory.
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the per-user state directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".devsync";

/// Name of the backup tree inside the state directory.
pub const BACKUP_DIR_NAME: &str = "backups";

/// Filename prefix shared by every archive package.
pub const PACKAGE_PREFIX: &str = "devsync_backup_";

/// Paths of the state directory and the backup root it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// `<home>/.devsync` unless overridden.
    pub config_dir: PathBuf,
    /// `<config_dir>/backups`, one subdirectory per category.
    pub backup_root: PathBuf,
}

impl Layout {
    /// Layout rooted at an explicit state directory.
    #[must_use]
    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let backup_root = config_dir.join(BACKUP_DIR_NAME);
        Self {
            config_dir,
            backup_root,
        }
    }

    /// Default layout for a user whose home directory is `home`.
    #[must_use]
    pub fn for_home(home: &Path) -> Self {
        Self::at(home.join(CONFIG_DIR_NAME))
    }

    /// Resolve the layout: explicit override, then `DEVSYNC_ROOT`, then the home default.
    #[must_use]
    pub fn resolve(root_override: Option<&Path>, home: &Path) -> Self {
        if let Some(root) = root_override {
            return Self::at(root);
        }
        if let Ok(root) = std::env::var("DEVSYNC_ROOT")
            && !root.is_empty()
        {
            return Self::at(root);
        }
        Self::for_home(home)
    }

    /// Create the state directory and the backup root if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be created.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.backup_root)
    }

    /// Settings file path inside the state directory.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default archive path for a package created at `timestamp` (`YYYYMMDD_HHMMSS`).
    #[must_use]
    pub fn package_path(&self, timestamp: &str) -> PathBuf {
        self.config_dir
            .join(format!("{PACKAGE_PREFIX}{timestamp}.zip"))
    }
}

/// Resolve the current user's home directory from the environment.
///
/// # Errors
///
/// Returns an error if the HOME (or USERPROFILE on Windows) environment variable
/// is not set.
pub fn resolve_home() -> Result<PathBuf, ConfigError> {
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map_err(|_| ConfigError::HomeNotSet("USERPROFILE"))?
    } else {
        std::env::var("HOME").map_err(|_| ConfigError::HomeNotSet("HOME"))?
    };
    Ok(PathBuf::from(home))
}
