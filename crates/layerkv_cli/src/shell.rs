//! Line-oriented shell over a single transaction stack.

use crate::command::{Command, HELP};
use crate::error::{CliError, CliResult};
use layerkv_core::TransactionStack;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading.
    Exit,
}

/// Executes shell commands against an owned stack, writing replies to `out`.
pub struct Shell<W: Write> {
    stack: TransactionStack<String, String>,
    out: W,
}

impl<W: Write> Shell<W> {
    /// Creates a shell with an empty stack.
    pub fn new(out: W) -> Self {
        Self {
            stack: TransactionStack::new(),
            out,
        }
    }

    /// Returns the stack the shell operates on.
    pub fn stack(&self) -> &TransactionStack<String, String> {
        &self.stack
    }

    /// Consumes the shell, returning its output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads and executes lines until end of input or `EXIT`.
    ///
    /// With `prompt` set, `> ` is written before each line.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> CliResult<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.execute_line(&line?)? == Flow::Exit {
                break;
            }
        }

        if self.stack.in_transaction() {
            warn!(
                depth = self.stack.depth(),
                "leaving shell with open transactions; uncommitted changes are discarded"
            );
        }
        Ok(())
    }

    /// Parses and executes one line.
    ///
    /// Blank lines and `#` comments are skipped. Parse errors and rejected
    /// operations are written as `ERROR: <message>` and do not stop the shell.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing output fails.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let result = line
            .parse::<Command>()
            .map_err(CliError::from)
            .and_then(|command| self.execute(command));
        match result {
            Ok(flow) => Ok(flow),
            Err(err) if err.is_recoverable() => {
                debug!(%err, line, "command failed");
                writeln!(self.out, "ERROR: {err}")?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Core`] when commit or rollback is rejected, and
    /// [`CliError::Io`] when writing output fails.
    pub fn execute(&mut self, command: Command) -> CliResult<Flow> {
        match command {
            Command::Set { key, value } => {
                self.stack.put(key, value);
                writeln!(self.out, "OK")?;
            }
            Command::Get { key } => match self.stack.get(key.as_str()) {
                Some(value) => writeln!(self.out, "{value}")?,
                None => writeln!(self.out, "NULL")?,
            },
            Command::Delete { key } => {
                self.stack.delete(key);
                writeln!(self.out, "OK")?;
            }
            Command::Exists { key } => {
                writeln!(self.out, "{}", self.stack.contains(key.as_str()))?;
            }
            Command::Begin => {
                self.stack.begin();
                writeln!(self.out, "OK")?;
            }
            Command::Commit => {
                self.stack.commit()?;
                writeln!(self.out, "OK")?;
            }
            Command::Rollback => {
                self.stack.rollback()?;
                writeln!(self.out, "OK")?;
            }
            Command::Depth => writeln!(self.out, "{}", self.stack.depth())?,
            Command::Stats => {
                let stats = self.stack.stats();
                writeln!(
                    self.out,
                    "depth={} edits={} tombstones={} started={} committed={} rolled_back={}",
                    stats.depth,
                    stats.edits,
                    stats.tombstones,
                    stats.transactions_started,
                    stats.transactions_committed,
                    stats.transactions_rolled_back
                )?;
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}
