//! In-place terminal output for live updates.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    terminal::{Clear, ClearType},
};

/// Sink for repeatedly refreshed output.
pub trait LiveOutput {
    /// Replace whatever the previous call displayed with `text`.
    fn write_snapshot(&mut self, text: &str) -> io::Result<()>;

    /// Release the sink. Further writes are not expected.
    fn stop(&mut self) -> io::Result<()>;
}

/// Redraws a block of lines in place by moving the cursor back over the previous block.
pub struct TerminalWriter<W: Write> {
    out: W,
    lines_drawn: u16,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines_drawn: 0 }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LiveOutput for TerminalWriter<W> {
    fn write_snapshot(&mut self, text: &str) -> io::Result<()> {
        if self.lines_drawn > 0 {
            queue!(
                self.out,
                MoveToPreviousLine(self.lines_drawn),
                Clear(ClearType::FromCursorDown)
            )?;
        }

        self.out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;

        self.lines_drawn = u16::try_from(text.lines().count()).unwrap_or(u16::MAX);
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.lines_drawn = 0;
        writeln!(self.out, "Stopped live updates.")?;
        self.out.flush()
    }
}
