//! Line-oriented terminal input.

use std::io::{self, BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before a valid answer was given")]
    Eof,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Reads answers from `input` and writes prompts and retry messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print a full line.
    pub fn say(&mut self, message: impl std::fmt::Display) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print a prompt without a newline so the answer is typed on the same line.
    pub fn ask(&mut self, prompt: &str) -> Result<(), PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(())
    }

    /// One line of input with its terminator removed. Invalid UTF-8 is replaced,
    /// not rejected, so it falls through to the caller's retry handling.
    pub fn read_line(&mut self) -> Result<String, PromptError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(PromptError::Eof);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Accepts exactly `y` or `n`.
    pub fn read_yes_no(&mut self) -> Result<bool, PromptError> {
        loop {
            match self.read_line()?.as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.say("Invalid input - select one of y/n")?,
            }
        }
    }

    /// A base-10 integer; negative values are returned as-is for the caller to range check.
    pub fn read_index(&mut self) -> Result<i64, PromptError> {
        loop {
            match self.read_line()?.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Input a valid number")?,
            }
        }
    }
}
