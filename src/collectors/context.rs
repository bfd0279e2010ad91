use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::settings::Commands;
use crate::config::{Config, Layout};
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Shared context for collectors, the packager and the restorer.
///
/// Built once at startup and passed by reference; nothing in the engine
/// reads process-wide state after that.
pub struct Context {
    /// Layout and settings.
    pub config: Config,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and collector recording.
    pub log: Arc<dyn Log>,
    /// User's home directory path (where tool state is read from).
    pub home: PathBuf,
    /// Command runner (a fake in tests, the shell otherwise).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("executor", &self.executor)
            .finish()
    }
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub fn new(
        config: Config,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        home: PathBuf,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            config,
            platform,
            log,
            home,
            executor,
        }
    }

    /// State directory and backup root.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.config.layout
    }

    /// Root of the per-category backup tree.
    #[must_use]
    pub fn backup_root(&self) -> &Path {
        &self.config.layout.backup_root
    }

    /// External CLI names from settings.
    #[must_use]
    pub const fn commands(&self) -> &Commands {
        &self.config.settings.commands
    }

    /// Create a copy of this context with a different logger.
    #[must_use]
    pub fn with_log(&self, log: Arc<dyn Log>) -> Self {
        Self {
            config: self.config.clone(),
            platform: Arc::clone(&self.platform),
            log,
            home: self.home.clone(),
            executor: Arc::clone(&self.executor),
        }
    }
}
