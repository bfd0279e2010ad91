//! VS Code user settings, snippets and the installed extension list.
//!
//! The settings directory depends on the platform; see [`settings_dir`].

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Collector, CollectorResult, Context, Subtree};
use crate::config::tools::Category;
use crate::platform::Os;

/// Settings entries copied from the editor's user directory.
const SETTINGS_ITEMS: &[&str] = &["settings.json", "keybindings.json", "snippets"];

/// Name of the extension inventory inside the subtree.
pub const EXTENSIONS_FILE: &str = "extensions.txt";

/// Back up VS Code user settings and the installed extension list.
#[derive(Debug)]
pub struct BackupVsCode;

/// Editor user-settings directory for `os` under `home`.
#[must_use]
pub fn settings_dir(os: Os, home: &Path) -> PathBuf {
    match os {
        Os::Windows => home.join("AppData").join("Roaming").join("Code").join("User"),
        Os::MacOs => home
            .join("Library")
            .join("Application Support")
            .join("Code")
            .join("User"),
        Os::Linux => home.join(".config").join("Code").join("User"),
    }
}

impl Collector for BackupVsCode {
    fn name(&self) -> &'static str {
        "VS Code settings"
    }

    fn category(&self) -> Category {
        Category::VsCode
    }

    fn run(&self, ctx: &Context) -> Result<CollectorResult> {
        let source = settings_dir(ctx.platform.os, &ctx.home);
        if !source.is_dir() {
            return Ok(CollectorResult::Skipped(
                "VS Code not found or not configured".to_string(),
            ));
        }
        ctx.log
            .debug(&format!("settings directory: {}", source.display()));

        let mut subtree = Subtree::new(ctx.backup_root(), self.category());
        for item in SETTINGS_ITEMS {
            let path = source.join(item);
            if path.is_file() {
                subtree.copy_file(&path, item)?;
            } else if path.is_dir() {
                subtree.copy_dir(&path, item)?;
            } else {
                ctx.log.debug(&format!("not present: {item}"));
            }
        }

        let command = format!("{} --list-extensions", ctx.commands().editor);
        let result = ctx.executor.run(&command);
        if result.success {
            let count = result.stdout.lines().filter(|l| !l.trim().is_empty()).count();
            subtree.write(EXTENSIONS_FILE, &result.stdout)?;
            ctx.log.info(&format!("{count} extensions listed"));
        } else {
            ctx.log.debug(&format!(
                "extension list unavailable: {}",
                result.stderr.trim()
            ));
        }

        ctx.log.success("VS Code settings backed up");
        Ok(CollectorResult::Ok)
    }
}
