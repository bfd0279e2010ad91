//! Interactive tool selection.
use std::io::{self, BufRead, Write};

use crate::config::tools::Tool;

/// Source of yes/no answers for the interactive backup.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionSource {
    /// Whether `tool` should be backed up.
    fn ask_yes_no(&mut self, tool: &Tool) -> bool;
}

/// Prompts on `output` and reads one answer line per tool from `input`.
///
/// `y` or `yes` (any case) selects; anything else, including end of input,
/// declines.
#[derive(Debug)]
pub struct PromptSelection<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelection<R, W> {
    /// Prompt over arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptSelection<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the terminal.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> SelectionSource for PromptSelection<R, W> {
    fn ask_yes_no(&mut self, tool: &Tool) -> bool {
        if write!(self.output, "Backup {}? (y/n): ", tool.description)
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
