use crate::config::ShellConfig;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::endpoint::USAGE;
use crate::errors::ShellResult;
use crate::session::Session;

use crossterm::{QueueableCommand, style::Print};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Which grammar applies to the next line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lines are commands for the dispatcher
    Disconnected,
    /// Lines are payload for the open connection
    Connected,
}

/// Strip the line terminator and leading whitespace from a console line
///
/// Trailing spaces are kept: they are part of the payload.
pub fn normalize_line(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim_start()
}

/// The interactive shell: one console, at most one connection
pub struct Shell<R, W> {
    input: R,
    output: W,
    prompt: String,
    dispatcher: Dispatcher,
    session: Session,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: ShellConfig) -> ShellResult<Self> {
        config.validate()?;

        Ok(Self {
            input,
            output,
            dispatcher: Dispatcher::new(config.max_wrong_commands),
            session: Session::new(&config),
            prompt: config.prompt,
        })
    }

    pub fn mode(&self) -> Mode {
        if self.session.is_connected() {
            Mode::Connected
        } else {
            Mode::Disconnected
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the shell, returning the console output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until end of input or a fatal error
    ///
    /// Any open connection is closed before returning.
    pub fn run(&mut self) -> ShellResult<()> {
        let result = loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.session.close();
        result
    }

    /// Read and handle one console line
    ///
    /// Returns `Ok(false)` once the console has no more input.
    pub fn step(&mut self) -> ShellResult<bool> {
        if self.session.is_connected() {
            self.output.queue(Print(&self.prompt))?;
            self.output.flush()?;
        }

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            info!("end of input");
            return Ok(false);
        }

        let raw = String::from_utf8_lossy(&raw);
        let line = normalize_line(&raw);
        if line.is_empty() {
            return Ok(true);
        }

        match self.mode() {
            Mode::Connected => {
                let exchange = self.session.handle_line(line, &mut self.output)?;
                debug!(?exchange, "line forwarded");
            }
            Mode::Disconnected => {
                if let Dispatch::Connect(endpoint) =
                    self.dispatcher.dispatch(line, &mut self.output)?
                {
                    if let Err(e) = self.session.connect(endpoint) {
                        info!(%endpoint, error = %e, "connect failed");
                        self.output
                            .queue(Print(format!("{}\n", e)))?
                            .queue(Print(format!("{}\n", USAGE)))?;
                        self.output.flush()?;
                    }
                }
            }
        }

        Ok(true)
    }
}
