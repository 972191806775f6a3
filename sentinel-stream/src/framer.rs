//! # Message Framer
//!
//! Splits an incoming byte stream into sentinel-delimited messages.
//!
//! TCP delivers bytes, not messages: one `read` may return half a reply, or a
//! reply followed by the start of the next one. The framer keeps everything it
//! has been fed and hands out complete messages one at a time, so a message
//! that spans several reads is reassembled and a second message that arrived
//! early is kept for the next request.

use crate::protocol::SENTINEL;

/// Stateful splitter for sentinel-terminated messages
#[derive(Debug, Clone)]
pub struct MessageFramer {
    /// Bytes received but not yet returned as part of a message
    buffer: Vec<u8>,
    /// Length of the prefix of `buffer` already known to contain no sentinel
    scanned: usize,
}

impl Default for MessageFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
        }
    }

    /// Feed a chunk of bytes read from the network
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Take the next complete message, if one has arrived
    ///
    /// The returned bytes exclude the sentinel. Anything after the sentinel
    /// stays buffered.
    ///
    /// # Example
    /// ```rust
    /// use sentinel_stream::MessageFramer;
    ///
    /// let mut framer = MessageFramer::new();
    /// framer.push(b"pi");
    /// assert_eq!(framer.next_message(), None);
    ///
    /// framer.push(b"ng\0po");
    /// assert_eq!(framer.next_message(), Some(b"ping".to_vec()));
    /// assert_eq!(framer.pending_len(), 2);
    /// ```
    pub fn next_message(&mut self) -> Option<Vec<u8>> {
        let offset = self.buffer[self.scanned..]
            .iter()
            .position(|&byte| byte == SENTINEL);

        match offset {
            Some(offset) => {
                let end = self.scanned + offset;
                let mut message: Vec<u8> = self.buffer.drain(..=end).collect();
                message.pop(); // sentinel
                self.scanned = 0;
                Some(message)
            }
            None => {
                self.scanned = self.buffer.len();
                None
            }
        }
    }

    /// Number of buffered bytes not yet returned
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drop everything buffered
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.scanned = 0;
    }
}
