//! Per-category collectors that capture host state into the backup root.
mod context;
pub mod dotfiles;
pub mod git;
pub mod packages;
pub mod ssh;
mod subtree;
pub mod vscode;

pub use context::Context;
pub use subtree::Subtree;

use anyhow::Result;

use crate::config::tools::Category;
use crate::logging::TaskStatus;

/// Outcome of a collector that ran without an unexpected error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorResult {
    /// Data was captured.
    Ok,
    /// Source data was absent; nothing to back up.
    Skipped(String),
}

/// A unit of work that backs up one category.
pub trait Collector: Send + Sync {
    /// Human-readable collector name.
    fn name(&self) -> &'static str;

    /// Category whose subtree this collector owns.
    fn category(&self) -> Category;

    /// Capture the category's state into its subtree.
    ///
    /// Missing sources are reported as [`CollectorResult::Skipped`], not as
    /// errors. Failed sub-queries are absorbed here and never surface.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected I/O faults while writing the
    /// backup tree.
    fn run(&self, ctx: &Context) -> Result<CollectorResult>;
}

/// Every collector, in collection order.
#[must_use]
pub fn all_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(vscode::BackupVsCode),
        Box::new(git::BackupGit),
        Box::new(ssh::BackupSsh),
        Box::new(packages::BackupPackages),
        Box::new(dotfiles::BackupDotfiles),
    ]
}

/// Run a collector, recording the result in the logger.
///
/// Returns `true` when the collector captured data. Neither a skip nor an
/// error is propagated; the caller moves on to the next collector.
pub fn execute(collector: &dyn Collector, ctx: &Context) -> bool {
    ctx.log.stage(&format!("Backing up {}", collector.name()));

    match collector.run(ctx) {
        Ok(CollectorResult::Ok) => {
            ctx.log.record_task(collector.name(), TaskStatus::Ok, None);
            true
        }
        Ok(CollectorResult::Skipped(reason)) => {
            ctx.log.warn(&reason);
            ctx.log
                .record_task(collector.name(), TaskStatus::Skipped, Some(&reason));
            false
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", collector.name()));
            ctx.log.record_task(
                collector.name(),
                TaskStatus::Failed,
                Some(&format!("{e:#}")),
            );
            false
        }
    }
}
