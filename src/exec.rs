//! Shell command runner for external inventory commands.
use std::process::{Command, Output, Stdio};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error, or the spawn failure message.
    pub stderr: String,
    /// Whether the command ran and exited with status zero.
    pub success: bool,
    /// Exit code, if the process ran to completion.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Result for a command that could not be started at all.
    #[must_use]
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            success: false,
            code: None,
        }
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs command lines through the platform shell.
///
/// Implementations never return an error: a missing binary or a spawn failure
/// is reported as `success = false` with the message in `stderr`, so callers
/// branch on the result instead of propagating.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `command` (a full shell command line) and capture its output.
    fn run(&self, command: &str) -> ExecResult;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, command: &str) -> ExecResult {
        run(command)
    }
}

/// Run a command line through the shell, capturing stdout/stderr.
///
/// Stdin is detached so that tools which would prompt fail instead of
/// waiting on the terminal.
#[must_use]
pub fn run(command: &str) -> ExecResult {
    match shell(command).stdin(Stdio::null()).output() {
        Ok(output) => ExecResult::from(output),
        Err(e) => ExecResult::spawn_failure(format!("failed to execute: {command}: {e}")),
    }
}

#[cfg(target_os = "windows")]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
