//! # telshell
//!
//! An interactive shell that bridges the console to a single raw TCP
//! connection. While disconnected, `telnet <ip>:<port>` opens a connection;
//! while connected, every line is sent to the peer terminated by a NUL byte
//! and the peer's NUL-terminated reply is printed, until `exit` or a
//! transport error.

pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod errors;
pub mod session;
pub mod shell;

pub use config::ShellConfig;
pub use endpoint::Endpoint;
pub use errors::{ShellError, ShellResult, UsageError};
pub use session::{Exchange, Session};
pub use shell::{Mode, Shell};

/// Version of the shell crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
