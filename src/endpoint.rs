use crate::errors::UsageError;

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

/// Usage line printed after every `telnet` argument or connect failure
pub const USAGE: &str = "Usage: telnet <ip_address>:<port>";

/// IPv4 address and port of a remote peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: Ipv4Addr,
    port: u16,
}

impl Endpoint {
    pub fn new(address: Ipv4Addr, port: u16) -> Self {
        Self { address, port }
    }

    /// Parse the arguments that followed the `telnet` command word
    ///
    /// Only the first argument is used; anything after it is ignored.
    pub fn from_args(args: &[&str]) -> Result<Self, UsageError> {
        match args.first() {
            Some(arg) => arg.parse(),
            None => Err(UsageError::MissingArguments),
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.address, self.port))
    }
}

impl FromStr for Endpoint {
    type Err = UsageError;

    /// Parse `address:port`
    ///
    /// The port is checked before the address, so `999.1.1.1:abc` reports
    /// the port.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address_text, port_text) = s.split_once(':').ok_or(UsageError::MissingSeparator)?;

        if port_text.is_empty() {
            return Err(UsageError::MissingPort);
        }

        let port = port_text
            .parse::<u16>()
            .map_err(|_| UsageError::InvalidPort(port_text.to_string()))?;

        let address = address_text
            .parse::<Ipv4Addr>()
            .map_err(|_| UsageError::InvalidAddress(address_text.to_string()))?;

        Ok(Self::new(address, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}
