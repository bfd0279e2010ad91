//! Domain-specific error types for the devsync engine.
//!
//! Internal modules return typed errors ([`ConfigError`] for home resolution
//! and `config.toml` loading, [`ArchiveError`] for packaging and restoring)
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! ```text
//! DevSyncError
//! ├── Config(ConfigError)   home directory, config.toml
//! └── Archive(ArchiveError) packaging, extraction
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for devsync.
///
/// Aggregates the domain errors and is convertible to [`anyhow::Error`] for
/// use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum DevSyncError {
    /// Home resolution or settings loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing or reading a package failed.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// Errors that arise while resolving the layout and loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine home directory: {0} is not set")]
    HomeNotSet(&'static str),

    /// The settings file exists but could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the expected schema.
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Errors that arise while writing or reading an archive package.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive to restore does not exist.
    #[error("Package not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A package already exists at the target path.
    #[error("Package already exists: {}", .0.display())]
    Exists(PathBuf),

    /// A filesystem operation failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The zip container could not be written or read.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walking the backup tree failed.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The metadata record could not be (de)serialized.
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl ArchiveError {
    /// Build a closure mapping an [`std::io::Error`] to [`ArchiveError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
