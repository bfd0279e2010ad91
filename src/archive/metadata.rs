//! Provenance record stored inside every archive package.
use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Name of the metadata entry inside the archive.
pub const METADATA_NAME: &str = "metadata.json";

/// Fixed creator identifier.
pub const CREATOR: &str = "devsync";

/// One per package, written as the archive's final entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Local creation time, ISO-8601.
    pub created_at: String,
    /// Originating OS name (`Linux`, `Darwin`, `Windows`).
    pub system: String,
    /// Originating CPU architecture.
    pub machine: String,
    /// Version of the tool that wrote the package.
    pub devsync_version: String,
    /// Always [`CREATOR`].
    pub creator: String,
    /// SHA-256 of every packaged file, keyed by archive path.
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl Metadata {
    /// Record for a package created at `now` on `platform`.
    #[must_use]
    pub fn new(
        now: &DateTime<Local>,
        platform: &Platform,
        checksums: BTreeMap<String, String>,
    ) -> Self {
        Self {
            created_at: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            system: platform.system_name().to_string(),
            machine: platform.machine.clone(),
            devsync_version: crate::VERSION.to_string(),
            creator: CREATOR.to_string(),
            checksums,
        }
    }
}
