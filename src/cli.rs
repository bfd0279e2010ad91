//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Top-level CLI entry point for the developer environment backup tool.
#[derive(Parser, Debug)]
#[command(
    name = "devsync",
    about = "Back up and restore developer environment configuration",
    version = crate::VERSION
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["backup", "restore", "status", "auto"])
        .multiple(false)
))]
pub struct Cli {
    /// Choose tools interactively, then package (the default)
    #[arg(long)]
    pub backup: bool,

    /// Restore a backup package
    #[arg(long, value_name = "PATH")]
    pub restore: Option<PathBuf>,

    /// Show what is backed up and the latest package
    #[arg(long)]
    pub status: bool,

    /// Back up every tool without prompting, then package
    #[arg(long)]
    pub auto: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Options shared by every mode.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all modes.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the devsync state directory (default: ~/.devsync)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write the backup package to this path instead of the state directory
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["restore", "status"])]
    pub output: Option<PathBuf>,
}

/// The selected top-level mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Interactive selection, then package.
    Backup,
    /// Every collector, then package.
    Auto,
    /// Restore the given package.
    Restore(PathBuf),
    /// Report backup state.
    Status,
}

impl Mode {
    /// Short name, used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Auto => "auto",
            Self::Restore(_) => "restore",
            Self::Status => "status",
        }
    }
}

impl Cli {
    /// Mode requested on the command line; interactive backup when none is given.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if let Some(path) = &self.restore {
            Mode::Restore(path.clone())
        } else if self.status {
            Mode::Status
        } else if self.auto {
            Mode::Auto
        } else {
            Mode::Backup
        }
    }
}
