//! Error types for the shell.

use layerkv_core::CoreError;
use std::io;
use thiserror::Error;

/// Result type for shell operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line held no command.
    #[error("empty command")]
    Empty,

    /// The verb is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument was not given.
    #[error("{command} requires a {argument}")]
    MissingArgument {
        /// The command being parsed.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// More arguments were given than the command takes.
    #[error("{command} takes no argument after {expected}, got {extra:?}")]
    UnexpectedArgument {
        /// The command being parsed.
        command: &'static str,
        /// What the command does take.
        expected: &'static str,
        /// The leftover input.
        extra: String,
    },
}

/// Errors that can occur while running the shell.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A command line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The store rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    /// Checks if the shell can report this error and keep reading input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
