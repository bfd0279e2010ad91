//! Startup configuration: state directory layout, settings and the tool table.

pub mod layout;
pub mod settings;
mod toml_loader;
pub mod tools;

pub use layout::Layout;
pub use settings::Settings;

use crate::error::ConfigError;

/// Everything resolved once at startup: where state lives and how to reach external CLIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// State directory and backup root.
    pub layout: Layout,
    /// Settings from `config.toml` (defaults when absent).
    pub settings: Settings,
}

impl Config {
    /// Load settings from the layout's `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn load(layout: Layout) -> Result<Self, ConfigError> {
        let settings = toml_loader::load_config(&layout.settings_file())?;
        Ok(Self { layout, settings })
    }

    /// Config with default settings, for callers that never read `config.toml`.
    #[must_use]
    pub fn with_defaults(layout: Layout) -> Self {
        Self {
            layout,
            settings: Settings::default(),
        }
    }
}
