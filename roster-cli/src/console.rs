//! Terminal rendering of confirmation prompts.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use colored::Colorize;

use roster_sync::Console;

/// Line console over any reader/writer pair; stdin/stdout in production.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn show(&mut self, line: &str) -> io::Result<()> {
        if line.ends_with(" N/A") {
            writeln!(self.output, "{}", line.bright_black())
        } else if line.starts_with(' ') {
            writeln!(self.output, "{line}")
        } else {
            writeln!(self.output, "{}", line.yellow().bold())
        }
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", question.cyan())?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(answer.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
