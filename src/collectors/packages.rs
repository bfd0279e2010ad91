//! Package-manager inventories.
//!
//! Each ecosystem is queried on its own. A failed or unparsable query skips
//! only that ecosystem's file; the collector itself always succeeds.
use anyhow::Result;
use serde_json::Value;

use super::{Collector, CollectorResult, Context, Subtree};
use crate::config::tools::Category;

/// `npm list -g` dependency names.
pub const NPM_FILE: &str = "npm_global.json";
/// `pip list` records.
pub const PIP_FILE: &str = "pip_packages.json";
/// `cargo install --list` output.
pub const CARGO_FILE: &str = "cargo_packages.txt";
/// Homebrew formulae.
pub const BREW_FORMULAE_FILE: &str = "brew_formulae.txt";
/// Homebrew casks.
pub const BREW_CASKS_FILE: &str = "brew_casks.txt";

/// Back up global package inventories.
#[derive(Debug)]
pub struct BackupPackages;

/// How a query's stdout becomes an inventory file.
#[derive(Debug, Clone, Copy)]
enum Normalize {
    /// Keys of the top-level `dependencies` object, as a JSON array.
    NpmDependencies,
    /// Any JSON value, re-serialized pretty.
    Json,
    /// Stdout as-is.
    Raw,
}

/// One ecosystem query.
#[derive(Debug)]
struct Query {
    label: &'static str,
    command: String,
    file: &'static str,
    normalize: Normalize,
}

impl Collector for BackupPackages {
    fn name(&self) -> &'static str {
        "package inventories"
    }

    fn category(&self) -> Category {
        Category::Packages
    }

    fn run(&self, ctx: &Context) -> Result<CollectorResult> {
        let mut subtree = Subtree::new(ctx.backup_root(), self.category());
        for query in queries(ctx) {
            capture(ctx, &mut subtree, &query);
        }
        ctx.log.success(&format!(
            "{} package inventories written",
            subtree.written()
        ));
        Ok(CollectorResult::Ok)
    }
}

/// The queries that apply on this platform, in order.
fn queries(ctx: &Context) -> Vec<Query> {
    let cmds = ctx.commands();
    let mut queries = vec![
        Query {
            label: "npm",
            command: format!("{} list -g --depth=0 --json", cmds.npm),
            file: NPM_FILE,
            normalize: Normalize::NpmDependencies,
        },
        Query {
            label: "pip",
            command: format!("{} list --format=json", cmds.pip),
            file: PIP_FILE,
            normalize: Normalize::Json,
        },
        Query {
            label: "cargo",
            command: format!("{} install --list", cmds.cargo),
            file: CARGO_FILE,
            normalize: Normalize::Raw,
        },
    ];
    if ctx.platform.is_macos() {
        queries.push(Query {
            label: "brew formulae",
            command: format!("{} list --formula -1", cmds.brew),
            file: BREW_FORMULAE_FILE,
            normalize: Normalize::Raw,
        });
        queries.push(Query {
            label: "brew casks",
            command: format!("{} list --cask -1", cmds.brew),
            file: BREW_CASKS_FILE,
            normalize: Normalize::Raw,
        });
    }
    queries
}

/// Run one query and write its file if the output is usable.
///
/// Every failure, including a failed write, stays local to this query.
fn capture(ctx: &Context, subtree: &mut Subtree, query: &Query) {
    let result = ctx.executor.run(&query.command);
    if !result.success {
        ctx.log.debug(&format!(
            "{} unavailable: {}",
            query.label,
            result.stderr.trim()
        ));
        return;
    }

    let (contents, count) = match normalize(query.normalize, &result.stdout) {
        Ok(normalized) => normalized,
        Err(e) => {
            ctx.log
                .debug(&format!("{} output not understood: {e}", query.label));
            return;
        }
    };
    if let Err(e) = subtree.write(query.file, contents) {
        ctx.log.warn(&format!("{}: {e:#}", query.label));
        return;
    }
    ctx.log.info(&format!("{}: {count} packages", query.label));
}

/// Convert raw stdout to file contents plus an entry count.
fn normalize(kind: Normalize, stdout: &str) -> Result<(String, usize)> {
    match kind {
        Normalize::NpmDependencies => {
            let value: Value = serde_json::from_str(stdout)?;
            let names: Vec<&String> = value
                .get("dependencies")
                .and_then(Value::as_object)
                .map(|deps| deps.keys().collect())
                .unwrap_or_default();
            Ok((serde_json::to_string_pretty(&names)?, names.len()))
        }
        Normalize::Json => {
            let value: Value = serde_json::from_str(stdout)?;
            let count = value.as_array().map_or(0, Vec::len);
            Ok((serde_json::to_string_pretty(&value)?, count))
        }
        Normalize::Raw => {
            let count = stdout.lines().filter(|l| !l.trim().is_empty()).count();
            Ok((stdout.to_string(), count))
        }
    }
}
