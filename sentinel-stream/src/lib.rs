//! # Sentinel Stream
//!
//! A small transport library for line protocols that terminate every message
//! with a single NUL byte (`0x00`) instead of a length prefix.
//!
//! The library is organized into three modules:
//! - `protocol`: the sentinel constant and outgoing message encoding
//! - `framer`: stateful splitting of a raw byte stream into messages
//! - `stream`: `SentinelStream`, a `TcpStream` wrapper with deadline-bound reads
//!
//! ```rust,no_run
//! use sentinel_stream::SentinelStream;
//! use std::time::Duration;
//!
//! fn main() -> std::io::Result<()> {
//!     let addr = "127.0.0.1:2323".parse().unwrap();
//!     let mut stream = SentinelStream::connect(addr, None)?;
//!     stream.write_message(b"ping")?;
//!     match stream.read_message(Duration::from_secs(10))? {
//!         Some(reply) => println!("{}", String::from_utf8_lossy(&reply)),
//!         None => println!("no reply"),
//!     }
//!     stream.close();
//!     Ok(())
//! }
//! ```

pub mod framer;
pub mod protocol;
pub mod stream;

pub use framer::MessageFramer;
pub use protocol::{SENTINEL, encode_message};
pub use stream::SentinelStream;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
