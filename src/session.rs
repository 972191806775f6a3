use crate::config::ShellConfig;
use crate::endpoint::Endpoint;

use crossterm::{QueueableCommand, style::Print};
use jiff::Timestamp;
use sentinel_stream::SentinelStream;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Line that closes the connection while connected
pub const EXIT_COMMAND: &str = "exit";

/// A live connection, owned by the session
struct Connection {
    stream: SentinelStream,
    endpoint: Endpoint,
    connected_at: Timestamp,
}

/// Result of one connected-mode line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// `exit` was typed; the connection is gone
    Closed,
    /// The peer replied; the text was printed
    Reply(String),
    /// No reply within the deadline; still connected
    TimedOut,
    /// Transport error; the connection was torn down and the error printed
    Failed,
}

/// Connected-mode half of the shell
///
/// Holds the single optional connection. Its presence is what makes the shell
/// "connected".
pub struct Session {
    connection: Option<Connection>,
    reply_timeout: Duration,
    connect_timeout: Option<Duration>,
}

impl Session {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            connection: None,
            reply_timeout: config.reply_timeout,
            connect_timeout: config.connect_timeout,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Endpoint of the open connection, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.connection.as_ref().map(|c| c.endpoint)
    }

    /// Received bytes still waiting for a sentinel
    pub fn buffered_len(&self) -> usize {
        self.connection
            .as_ref()
            .map_or(0, |c| c.stream.buffered_len())
    }

    /// Open a connection, replacing any existing one
    pub fn connect(&mut self, endpoint: Endpoint) -> io::Result<()> {
        self.close();

        let stream = SentinelStream::connect(endpoint.socket_addr(), self.connect_timeout)?;
        info!(
            address = %endpoint.address(),
            port = endpoint.port(),
            local = ?stream.local_addr().ok(),
            "connected"
        );

        self.connection = Some(Connection {
            stream,
            endpoint,
            connected_at: Timestamp::now(),
        });
        Ok(())
    }

    /// Handle one trimmed connected-mode line
    ///
    /// Transport failures are swallowed here: the connection is closed and
    /// the error printed. The returned error is a console failure only.
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<Exchange> {
        if line == EXIT_COMMAND {
            self.close();
            return Ok(Exchange::Closed);
        }

        let Some(connection) = self.connection.as_mut() else {
            debug!("line received with no connection open");
            return Ok(Exchange::Closed);
        };

        if !line.is_empty() {
            if let Err(e) = connection.stream.write_message(line.as_bytes()) {
                return self.fail(e, output);
            }
        }

        match connection.stream.read_message(self.reply_timeout) {
            Ok(Some(reply)) => {
                let text = String::from_utf8_lossy(&reply).into_owned();
                output.queue(Print(format!("{}\n", text)))?;
                output.flush()?;
                Ok(Exchange::Reply(text))
            }
            Ok(None) => {
                debug!(timeout = ?self.reply_timeout, "no reply before deadline");
                Ok(Exchange::TimedOut)
            }
            Err(e) => self.fail(e, output),
        }
    }

    /// Close the connection, if open, dropping any buffered reply bytes
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            let lifetime = Timestamp::now().duration_since(connection.connected_at);
            info!(endpoint = %connection.endpoint, ?lifetime, "connection closed");
            connection.stream.close();
        }
    }

    fn fail<W: Write>(&mut self, error: io::Error, output: &mut W) -> io::Result<Exchange> {
        warn!(endpoint = ?self.endpoint(), %error, "transport error");
        self.close();

        output.queue(Print(format!("{}\n", error)))?;
        output.flush()?;
        Ok(Exchange::Failed)
    }
}
