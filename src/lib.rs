//! Developer environment backup engine.
//!
//! Captures editor settings, git identity, shareable SSH files, package
//! manager inventories and shell dotfiles into a per-tool backup tree, packs
//! that tree into a single timestamped zip archive, and replays an archive
//! on another machine.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: directory layout, tool records and `config.toml` settings
//! - **[`exec`]**: shell command runner that never fails on non-zero exits
//! - **[`collectors`]**: one unit of work per tool category
//! - **[`archive`]**: packaging the backup tree and restoring it
//! - **[`commands`]**: top-level mode orchestration (`backup`, `auto`, `restore`, `status`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod archive;
pub mod cli;
pub mod collectors;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;

/// Version string reported by `--version` and embedded in archive metadata.
///
/// Taken from `DEVSYNC_VERSION` at build time when set, otherwise the crate
/// version.
pub const VERSION: &str = match option_env!("DEVSYNC_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
