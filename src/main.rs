//! devsync command-line entry point.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use devsync::cli::{Cli, Mode};
use devsync::commands::{self, selection::PromptSelection};
use devsync::logging::{self, Log, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let mode = args.mode();
    logging::init_subscriber(args.verbose, mode.name());
    let log = Arc::new(Logger::new(mode.name()));

    match run(&args, &mode, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, mode: &Mode, log: &Arc<Logger>) -> Result<()> {
    let ctx = commands::init_context(&args.global, Arc::clone(log) as Arc<dyn Log>)?;
    log.info(&format!("devsync {}", devsync::VERSION));
    let output = args.global.output.as_deref();

    match mode {
        Mode::Backup => {
            let mut prompt = PromptSelection::stdio();
            commands::backup::run_interactive(&ctx, log, &mut prompt, output).map(drop)
        }
        Mode::Auto => commands::backup::run_auto(&ctx, log, output).map(drop),
        Mode::Restore(path) => commands::restore::run(&ctx, path),
        Mode::Status => commands::status::run(&ctx),
    }
}
