//! Shell command parsing.

use crate::error::ParseError;
use std::str::FromStr;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value>`; the value is the rest of the line.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET <key>`
    Get {
        /// Key to read.
        key: String,
    },
    /// `DELETE <key>`
    Delete {
        /// Key to delete.
        key: String,
    },
    /// `EXISTS <key>`
    Exists {
        /// Key to check.
        key: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `DEPTH`
    Depth,
    /// `STATS`
    Stats,
    /// `HELP`
    Help,
    /// `EXIT` or `QUIT`
    Exit,
}

/// Text printed by `HELP`.
pub const HELP: &str = "\
Commands:
  SET <key> <value>   write a value (value may contain spaces)
  GET <key>           print a value, or NULL
  DELETE <key>        delete a key
  EXISTS <key>        print true or false
  BEGIN               open a nested transaction
  COMMIT              fold the innermost transaction into its parent
  ROLLBACK            discard the innermost transaction
  DEPTH               print the number of open transactions
  STATS               print stack statistics
  HELP                show this text
  EXIT | QUIT         leave the shell";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        if verb.is_empty() {
            return Err(ParseError::Empty);
        }

        match verb.to_ascii_uppercase().as_str() {
            "SET" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(key, value)| (key, value.trim()))
                    .ok_or(ParseError::MissingArgument {
                        command: "SET",
                        argument: if rest.is_empty() { "key" } else { "value" },
                    })?;
                Ok(Self::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "GET" => single_key("GET", rest).map(|key| Self::Get { key }),
            "DELETE" | "DEL" => single_key("DELETE", rest).map(|key| Self::Delete { key }),
            "EXISTS" => single_key("EXISTS", rest).map(|key| Self::Exists { key }),
            "BEGIN" => no_args("BEGIN", rest, Self::Begin),
            "COMMIT" => no_args("COMMIT", rest, Self::Commit),
            "ROLLBACK" => no_args("ROLLBACK", rest, Self::Rollback),
            "DEPTH" => no_args("DEPTH", rest, Self::Depth),
            "STATS" => no_args("STATS", rest, Self::Stats),
            "HELP" => Ok(Self::Help),
            "EXIT" | "QUIT" => no_args("EXIT", rest, Self::Exit),
            _ => Err(ParseError::UnknownCommand(verb.to_string())),
        }
    }
}

fn single_key(command: &'static str, rest: &str) -> Result<String, ParseError> {
    let mut parts = rest.split_whitespace();
    let key = parts.next().ok_or(ParseError::MissingArgument {
        command,
        argument: "key",
    })?;
    let extra: Vec<&str> = parts.collect();
    if !extra.is_empty() {
        return Err(ParseError::UnexpectedArgument {
            command,
            expected: "the key",
            extra: extra.join(" "),
        });
    }
    Ok(key.to_string())
}

fn no_args(command: &'static str, rest: &str, parsed: Command) -> Result<Command, ParseError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::UnexpectedArgument {
            command,
            expected: "the command",
            extra: rest.to_string(),
        })
    }
}
