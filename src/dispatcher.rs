use crate::endpoint::{Endpoint, USAGE};
use crate::errors::{ShellError, ShellResult};

use crossterm::{QueueableCommand, style::Print};
use std::io::Write;
use tracing::debug;

/// Command word that opens a connection
pub const TELNET_COMMAND: &str = "telnet";

const WRONG_COMMAND: &str = "Wrong command!";

/// Split a console line into words
///
/// Splits on spaces and tabs, collapses runs of delimiters and never yields
/// empty words.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split([' ', '\t'])
        .filter(|token| !token.is_empty())
        .collect()
}

/// What the run loop should do after a disconnected-mode line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A valid `telnet` command: open a connection to this endpoint
    Connect(Endpoint),
    /// The line was fully handled (usage error or wrong command); stay disconnected
    Handled,
}

/// Interprets input while no connection is open
///
/// Counts unrecognized commands for the lifetime of the process. The count is
/// never reset, not even by a successful connect.
#[derive(Debug)]
pub struct Dispatcher {
    wrong_commands: u32,
    max_wrong_commands: u32,
}

impl Dispatcher {
    pub fn new(max_wrong_commands: u32) -> Self {
        Self {
            wrong_commands: 0,
            max_wrong_commands,
        }
    }

    pub fn wrong_commands(&self) -> u32 {
        self.wrong_commands
    }

    /// Handle one trimmed, non-empty disconnected-mode line
    ///
    /// Usage errors are printed here and reported as `Dispatch::Handled`.
    /// The only error returned is fatal: the wrong-command limit was reached,
    /// or the console could not be written.
    pub fn dispatch<W: Write>(&mut self, line: &str, output: &mut W) -> ShellResult<Dispatch> {
        let tokens = tokenize(line);

        match tokens.split_first() {
            Some((&TELNET_COMMAND, args)) => match Endpoint::from_args(args) {
                Ok(endpoint) => {
                    debug!(%endpoint, "telnet command accepted");
                    Ok(Dispatch::Connect(endpoint))
                }
                Err(e) => {
                    debug!(error = %e, "telnet command rejected");
                    output
                        .queue(Print(format!("{}\n", e)))?
                        .queue(Print(format!("{}\n", USAGE)))?;
                    output.flush()?;
                    Ok(Dispatch::Handled)
                }
            },
            _ => self.reject(output),
        }
    }

    fn reject<W: Write>(&mut self, output: &mut W) -> ShellResult<Dispatch> {
        self.wrong_commands += 1;
        debug!(count = self.wrong_commands, "wrong command");

        output.queue(Print(format!("{}\n", WRONG_COMMAND)))?;
        output.flush()?;

        if self.wrong_commands >= self.max_wrong_commands {
            return Err(ShellError::TooManyWrongCommands {
                count: self.wrong_commands,
            });
        }
        Ok(Dispatch::Handled)
    }
}
