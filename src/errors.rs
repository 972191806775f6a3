use thiserror::Error;

/// Fatal errors: anything of this type ends the shell with a non-zero status
#[derive(Debug, Error)]
pub enum ShellError {
    /// Too many unrecognized commands in disconnected mode
    #[error("Exiting...")]
    TooManyWrongCommands { count: u32 },

    /// The console itself could not be read or written
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),

    /// The shell was started with an unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Malformed argument to the `telnet` command
///
/// Recovered where it happens: the diagnostic and the usage line are printed
/// and the shell stays disconnected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Not enough parameters")]
    MissingArguments,

    #[error("Missing ':' between address and port")]
    MissingSeparator,

    #[error("Missing port number")]
    MissingPort,

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Result type alias for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
