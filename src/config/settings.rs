//! User settings loaded from `config.toml`.
//!
//! ```toml
//! [commands]
//! editor = "code-insiders"
//! pip = "pip3"
//! ```
use serde::Deserialize;

/// Parsed contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// External CLI names used by collectors and the restorer.
    pub commands: Commands,
}

/// Names of the external CLIs invoked through the command runner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Commands {
    /// Editor CLI used to list and install extensions.
    pub editor: String,
    /// Version-control CLI used to read the global identity.
    pub git: String,
    /// Node package manager.
    pub npm: String,
    /// Python package manager.
    pub pip: String,
    /// Rust package manager.
    pub cargo: String,
    /// Homebrew (queried on macOS only).
    pub brew: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            editor: "code".to_string(),
            git: "git".to_string(),
            npm: "npm".to_string(),
            pip: "pip".to_string(),
            cargo: "cargo".to_string(),
            brew: "brew".to_string(),
        }
    }
}
