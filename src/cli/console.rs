//! Line-oriented terminal I/O
//!
//! Wraps an input reader and the output/error writers so the interactive
//! shell can be driven by stdin in the binary and by byte buffers in tests.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use crate::error::LedgerResult;

/// Prompt-and-read console over arbitrary streams
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    /// Console bound to the process's standard streams
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Print `prompt` and read one line of input
    ///
    /// Returns `None` at end of input; otherwise the line without
    /// surrounding whitespace.
    pub fn prompt(&mut self, prompt: &str) -> LedgerResult<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    /// Write text to the output stream as-is
    pub fn print(&mut self, text: &str) -> LedgerResult<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Write a line to the output stream
    pub fn println(&mut self, text: &str) -> LedgerResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// Write a diagnostic line to the error stream
    pub fn warn(&mut self, text: &str) -> LedgerResult<()> {
        writeln!(self.err, "{}", text)?;
        self.err.flush()?;
        Ok(())
    }

    /// Consume the console, returning the output and error writers
    pub fn into_writers(self) -> (W, E) {
        (self.out, self.err)
    }
}
