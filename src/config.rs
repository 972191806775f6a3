use crate::errors::ConfigError;

use std::time::Duration;

/// Tunable constants of the shell
///
/// The binary always runs with `ShellConfig::default()`; nothing is read from
/// files or the environment. Other values exist so tests can use short
/// timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Longest wait for a reply after each forwarded line
    pub reply_timeout: Duration,
    /// Connect deadline; `None` leaves it to the operating system
    pub connect_timeout: Option<Duration>,
    /// Unrecognized disconnected-mode commands tolerated before exiting
    pub max_wrong_commands: u32,
    /// Written before every read while connected
    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            reply_timeout: Duration::from_secs(10),
            connect_timeout: None,
            max_wrong_commands: 3,
            prompt: "#".to_string(),
        }
    }
}

impl ShellConfig {
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_timeout.is_zero() {
            return Err(ConfigError::ZeroValue("reply_timeout"));
        }
        if self.connect_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroValue("connect_timeout"));
        }
        if self.max_wrong_commands == 0 {
            return Err(ConfigError::ZeroValue("max_wrong_commands"));
        }
        Ok(())
    }
}
