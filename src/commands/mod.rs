//! Mode handlers and the startup wiring they share.

pub mod backup;
pub mod restore;
pub mod selection;
pub mod status;

use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::collectors::Context;
use crate::config::{Config, Layout, layout};
use crate::error::DevSyncError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::platform::Platform;

/// Resolve the state directory, load settings and build the shared [`Context`].
///
/// Nothing is created on disk here; the backup modes create the backup root
/// themselves.
///
/// # Errors
///
/// Returns [`DevSyncError::Config`] if the home directory cannot be
/// determined or `config.toml` exists but fails to parse.
pub fn init_context(global: &GlobalOpts, log: Arc<dyn Log>) -> Result<Context, DevSyncError> {
    init_context_with(global, log, Arc::new(SystemExecutor))
}

/// Like [`init_context`] with an explicit command runner.
///
/// # Errors
///
/// Same as [`init_context`].
pub fn init_context_with(
    global: &GlobalOpts,
    log: Arc<dyn Log>,
    executor: Arc<dyn Executor>,
) -> Result<Context, DevSyncError> {
    let home = layout::resolve_home()?;
    let layout = Layout::resolve(global.root.as_deref(), &home);
    log.debug(&format!("state directory: {}", layout.config_dir.display()));

    let config = Config::load(layout)?;
    let platform = Platform::detect();
    log.debug(&format!("platform: {} {}", platform.os, platform.machine));

    Ok(Context::new(config, Arc::new(platform), log, home, executor))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::logging::Logger;

    #[test]
    fn root_override_sets_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let global = GlobalOpts {
            root: Some(tmp.path().join("state")),
            output: None,
        };
        let ctx = init_context(&global, Arc::new(Logger::new("test"))).unwrap();
        assert_eq!(ctx.layout().config_dir, tmp.path().join("state"));
        assert_eq!(ctx.backup_root(), tmp.path().join("state").join("backups"));
        assert!(!ctx.layout().config_dir.exists());
    }

    #[test]
    fn invalid_settings_fail_setup() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "[commands]\nbogus = 1\n").unwrap();
        let global = GlobalOpts {
            root: Some(tmp.path().to_path_buf()),
            output: None,
        };
        let err = init_context(&global, Arc::new(Logger::new("test"))).unwrap_err();
        assert!(matches!(err, DevSyncError::Config(ConfigError::Parse { .. })));
    }
}
