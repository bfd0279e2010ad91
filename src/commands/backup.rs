//! The `backup` and `auto` modes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::selection::SelectionSource;
use crate::archive;
use crate::collectors::{self, Context};
use crate::config::tools::{Category, SUPPORTED_TOOLS};
use crate::logging::Logger;

/// Ask about every supported tool and return the categories to back up.
///
/// Every tool is asked about, in order. `npm`, `pip` and `cargo` collapse into
/// [`Category::Packages`]: a yes to any of them selects it.
pub fn select_categories(source: &mut dyn SelectionSource) -> BTreeSet<Category> {
    let mut selected = BTreeSet::new();
    for tool in SUPPORTED_TOOLS {
        if source.ask_yes_no(tool) {
            selected.insert(tool.category);
        }
    }
    selected
}

/// Interactive backup: prompt, run the chosen collectors, package.
///
/// # Errors
///
/// Returns an error if the backup root cannot be created or packaging fails.
pub fn run_interactive(
    ctx: &Context,
    log: &Logger,
    source: &mut dyn SelectionSource,
    output: Option<&Path>,
) -> Result<PathBuf> {
    log.stage("Selecting tools");
    let selected = select_categories(source);
    if selected.is_empty() {
        log.warn("no tools selected");
    }
    run(ctx, log, &selected, output)
}

/// Back up every category without prompting, then package.
///
/// # Errors
///
/// Returns an error if the backup root cannot be created or packaging fails.
pub fn run_auto(ctx: &Context, log: &Logger, output: Option<&Path>) -> Result<PathBuf> {
    let all: BTreeSet<Category> = Category::ALL.into_iter().collect();
    run(ctx, log, &all, output)
}

/// Run the collectors for `selected` in fixed order and package the result.
///
/// Collector outcomes never abort the run; exactly one package is produced.
///
/// # Errors
///
/// Returns an error if the backup root cannot be created or packaging fails.
pub fn run(
    ctx: &Context,
    log: &Logger,
    selected: &BTreeSet<Category>,
    output: Option<&Path>,
) -> Result<PathBuf> {
    ctx.layout().ensure()?;

    for collector in collectors::all_collectors() {
        if selected.contains(&collector.category()) {
            collectors::execute(collector.as_ref(), ctx);
        }
    }
    log.print_summary();

    log.stage("Packaging");
    let path = archive::package(ctx, output)?;
    log.success(&format!("Backup package created: {}", path.display()));
    Ok(path)
}
