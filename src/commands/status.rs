//! The `status` mode: per-tool backup state and the newest package.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};

use crate::collectors::Context;
use crate::config::layout::PACKAGE_PREFIX;
use crate::config::tools::{SUPPORTED_TOOLS, Tool};

/// Backup state of one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// The tool record.
    pub tool: Tool,
    /// Subtree the tool's collector writes to.
    pub path: PathBuf,
    /// Whether that subtree exists.
    pub exists: bool,
    /// Direct entries in the subtree (zero when absent).
    pub entries: usize,
}

/// The most recently created package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// File name, e.g. `devsync_backup_20240102_030405.zip`.
    pub name: String,
    /// Filesystem creation time.
    pub created: DateTime<Local>,
}

/// Per-tool state for every supported tool, in prompt order.
///
/// # Errors
///
/// Returns an error if an existing subtree cannot be listed.
pub fn tool_statuses(backup_root: &Path) -> Result<Vec<ToolStatus>> {
    SUPPORTED_TOOLS
        .iter()
        .map(|tool| -> Result<ToolStatus> {
            let path = backup_root.join(tool.category.dir_name());
            let exists = path.is_dir();
            let entries = if exists {
                std::fs::read_dir(&path)
                    .with_context(|| format!("reading directory {}", path.display()))?
                    .count()
            } else {
                0
            };
            Ok(ToolStatus {
                tool: *tool,
                path,
                exists,
                entries,
            })
        })
        .collect()
}

/// Newest `devsync_backup_*.zip` in `dir` by creation time.
///
/// Falls back to modification time where the filesystem does not record
/// creation time. The timestamp embedded in the name is not consulted.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be listed.
pub fn latest_package(dir: &Path) -> Result<Option<PackageInfo>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let mut latest: Option<(SystemTime, String)> = None;
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_package_name(&name) {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let Ok(created) = meta.created().or_else(|_| meta.modified()) else {
            continue;
        };
        if latest.as_ref().is_none_or(|(t, _)| created > *t) {
            latest = Some((created, name));
        }
    }
    Ok(latest.map(|(created, name)| PackageInfo {
        name,
        created: DateTime::<Local>::from(created),
    }))
}

fn is_package_name(name: &str) -> bool {
    name.starts_with(PACKAGE_PREFIX) && name.ends_with(".zip")
}

/// Report per-tool backup presence and the latest package.
///
/// # Errors
///
/// Returns an error if the state directory cannot be read.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.log.stage("Backup status");
    for status in tool_statuses(ctx.backup_root())? {
        if status.exists {
            ctx.log.success(&format!(
                "{} ({}): {} items",
                status.tool.description, status.tool.key, status.entries
            ));
        } else {
            ctx.log.info(&format!(
                "{} ({}): not backed up",
                status.tool.description, status.tool.key
            ));
        }
    }

    ctx.log.stage("Latest package");
    match latest_package(&ctx.layout().config_dir)? {
        Some(package) => ctx.log.info(&format!(
            "{} (created {})",
            package.name,
            package.created.format("%Y-%m-%d %H:%M:%S")
        )),
        None => ctx.log.info("no backup packages found"),
    }
    Ok(())
}
