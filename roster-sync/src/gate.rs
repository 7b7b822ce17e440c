//! Confirmation gate in front of every mutating phase.
//!
//! The gate decides; the [`Console`] renders. Keeping terminal styling out of
//! this module lets tests drive prompts with scripted answers.

use std::io;

use crate::error::SyncError;

/// How a run treats confirmation prompts. One axis, so "preview" and
/// "apply without asking" cannot both be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Show every planned change, apply nothing.
    DryRun,
    /// Apply every planned change without asking.
    AutoConfirm,
    /// Ask before each phase.
    #[default]
    Interactive,
}

/// Outcome of a gate that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip,
}

/// Line-oriented operator console.
pub trait Console {
    /// Print one line of output.
    fn show(&mut self, line: &str) -> io::Result<()>;

    /// Print `question` and read one answer. `None` means input is closed.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Formats one item of an action set for a confirmation listing.
pub trait ActionFormat {
    type Item;

    fn format(&self, item: &Self::Item) -> String;
}

/// The question shown in interactive mode.
pub const CHOICES: &str = "[Y]es / [S]kip step / [A]bort";

/// Gates each phase according to the [`RunMode`].
pub struct ConfirmationGate<C> {
    console: C,
    mode: RunMode,
}

impl<C: Console> ConfirmationGate<C> {
    pub fn new(console: C, mode: RunMode) -> Self {
        Self { console, mode }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// List `affected` under `prompt` and decide whether to apply it.
    ///
    /// An empty list is skipped without asking. [`RunMode::DryRun`] always
    /// skips, [`RunMode::AutoConfirm`] always proceeds. In interactive mode
    /// the operator is asked until a valid answer is given; Abort (or closed
    /// input) returns [`SyncError::Aborted`].
    pub fn confirm<T, F: ActionFormat<Item = T>>(
        &mut self,
        prompt: &str,
        affected: &[T],
        formatter: &F,
    ) -> Result<Decision, SyncError> {
        if affected.is_empty() {
            self.console.show(&format!("{prompt} N/A"))?;
            return Ok(Decision::Skip);
        }

        self.console.show(prompt)?;
        for item in affected {
            self.console.show(&format!("  {}", formatter.format(item)))?;
        }

        match self.mode {
            RunMode::DryRun => Ok(Decision::Skip),
            RunMode::AutoConfirm => Ok(Decision::Proceed),
            RunMode::Interactive => self.ask_until_answered(),
        }
    }

    fn ask_until_answered(&mut self) -> Result<Decision, SyncError> {
        loop {
            let Some(answer) = self.console.ask(CHOICES)? else {
                return Err(SyncError::Aborted);
            };
            match parse_answer(&answer) {
                Some(Answer::Yes) => return Ok(Decision::Proceed),
                Some(Answer::Skip) => return Ok(Decision::Skip),
                Some(Answer::Abort) => return Err(SyncError::Aborted),
                None => {}
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Yes,
    Skip,
    Abort,
}

fn parse_answer(raw: &str) -> Option<Answer> {
    match raw.trim() {
        "y" | "Y" => Some(Answer::Yes),
        "s" | "S" => Some(Answer::Skip),
        "a" | "A" => Some(Answer::Abort),
        _ => None,
    }
}
