//! # SentinelStream - Message Framing over TcpStream
//!
//! `SentinelStream` wraps a blocking `TcpStream` and exchanges whole
//! sentinel-terminated messages instead of raw bytes.
//!
//! ## Deadline-bound reads
//! `read_message` never blocks past the timeout it is given. Before every
//! socket read the read timeout is re-armed with whatever is left of the
//! deadline, so a peer trickling bytes in cannot stretch the wait.
//!
//! ## Buffered bytes
//! Bytes that arrive after a sentinel are kept for the next `read_message`
//! call. `close` consumes the stream, so nothing buffered can outlive the
//! connection it came from.

use crate::framer::MessageFramer;
use crate::protocol::{encode_message, is_transparent};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Size of the scratch buffer used for each socket read
const READ_CHUNK: usize = 4096;

/// A TcpStream that sends and receives sentinel-terminated messages
pub struct SentinelStream {
    /// Underlying TCP stream
    inner: TcpStream,

    /// Reassembles messages from partial reads
    framer: MessageFramer,

    /// Peer address captured at connect time
    peer: SocketAddr,
}

impl SentinelStream {
    /// Connect to a remote peer
    ///
    /// With `connect_timeout` set, the attempt is abandoned after that long;
    /// otherwise the operating system's connect timeout applies.
    pub fn connect(addr: SocketAddr, connect_timeout: Option<Duration>) -> io::Result<Self> {
        let stream = match connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        debug!(%addr, "tcp connection established");
        Self::new(stream)
    }

    /// Wrap an already connected TcpStream
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr()?;

        Ok(Self {
            inner: stream,
            framer: MessageFramer::new(),
            peer,
        })
    }

    /// Send one message: the payload followed by the sentinel
    pub fn write_message(&mut self, payload: &[u8]) -> io::Result<()> {
        if !is_transparent(payload) {
            warn!(peer = %self.peer, "payload contains the sentinel byte and will be split by the peer");
        }

        self.inner.write_all(&encode_message(payload))?;
        self.inner.flush()?;

        trace!(peer = %self.peer, bytes = payload.len(), "message sent");
        Ok(())
    }

    /// Wait for the next complete message
    ///
    /// Returns `Ok(Some(payload))` once a sentinel has been received (the
    /// sentinel itself is stripped), `Ok(None)` if `timeout` elapses first.
    /// A peer closing the connection is reported as `UnexpectedEof`.
    pub fn read_message(&mut self, timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        let deadline = Instant::now() + timeout;
        let mut chunk = [0; READ_CHUNK];

        loop {
            if let Some(message) = self.framer.next_message() {
                trace!(peer = %self.peer, bytes = message.len(), "message received");
                return Ok(Some(message));
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            // A zero read timeout is rejected by the OS, hence the check above
            self.inner.set_read_timeout(Some(remaining))?;

            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed by peer",
                    ));
                }
                Ok(n) => {
                    trace!(peer = %self.peer, bytes = n, "read chunk");
                    self.framer.push(&chunk[..n]);
                }
                Err(ref e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    debug!(peer = %self.peer, pending = self.framer.pending_len(), "read deadline reached");
                    return Ok(None);
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Number of received bytes waiting for a sentinel
    pub fn buffered_len(&self) -> usize {
        self.framer.pending_len()
    }

    /// Address of the remote peer
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Local address of the underlying TcpStream
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Shut the connection down and drop any buffered bytes
    ///
    /// Shutdown errors (for example on a socket the peer already reset) are
    /// ignored: closing always succeeds.
    pub fn close(mut self) {
        self.framer.clear();
        if let Err(e) = self.inner.shutdown(Shutdown::Both) {
            trace!(peer = %self.peer, error = %e, "shutdown failed");
        }
        debug!(peer = %self.peer, "tcp connection closed");
    }
}
