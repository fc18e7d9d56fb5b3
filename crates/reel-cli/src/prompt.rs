//! Line-oriented input with validation loops.
//!
//! Every reader returns `Ok(None)` once input is exhausted so the shell can
//! treat end of input like choosing Exit.

use std::io::{self, BufRead, ErrorKind, Write};

use log::warn;

pub const INVALID_CHOICE: &str = "Please choose a valid option";
pub const NOT_A_NUMBER: &str = "Invalid input. Please enter a number.";
pub const EMPTY_INPUT: &str = "Input cannot be empty. Please try again.";
pub const UNREADABLE_INPUT: &str = "Input could not be read as text. Please try again.";

/// Prompts on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output stream prompts are written to.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Asks until the answer is a number accepted by `is_valid`.
    pub fn choice(
        &mut self,
        prompt: &str,
        is_valid: impl Fn(i64) -> bool,
    ) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(choice) if is_valid(choice) => return Ok(Some(choice)),
                Ok(_) => writeln!(self.output, "{INVALID_CHOICE}")?,
                Err(_) => writeln!(self.output, "{NOT_A_NUMBER}")?,
            }
        }
    }

    /// Asks until the trimmed answer is not empty.
    pub fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            if !line.is_empty() {
                return Ok(Some(line));
            }
            writeln!(self.output, "{EMPTY_INPUT}")?;
        }
    }

    /// Asks once; only `y` (any case) counts as yes. End of input is a no.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    /// Writes `prompt` and reads one trimmed line.
    ///
    /// A line that is not valid UTF-8 has already been consumed when
    /// `read_line` rejects it, so it is dropped and the prompt repeated.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(line.trim().to_string())),
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    warn!("Discarded unreadable input line: {err}");
                    writeln!(self.output, "{UNREADABLE_INPUT}")?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
