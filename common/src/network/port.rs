//! Service ports and the transport they are served on.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Ports below this need elevated privilege to bind on most systems.
pub const PRIVILEGED_PORT_LIMIT: u16 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            other => Err(format!("unknown protocol: {other}")),
        }
    }
}

/// A `(port, protocol)` pair, e.g. `69/udp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortBinding {
    pub port: u16,
    pub protocol: Protocol,
}

impl PortBinding {
    pub fn new(port: u16, protocol: Protocol) -> Self {
        Self { port, protocol }
    }

    pub fn tcp(port: u16) -> Self {
        Self::new(port, Protocol::Tcp)
    }

    pub fn udp(port: u16) -> Self {
        Self::new(port, Protocol::Udp)
    }

    pub fn is_privileged(&self) -> bool {
        self.port < PRIVILEGED_PORT_LIMIT
    }
}

impl fmt::Display for PortBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

impl FromStr for PortBinding {
    type Err = String;

    /// Parses `port/protocol` (`8080/tcp`, `69/udp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((port_str, proto_str)) = s.split_once('/') else {
            return Err(format!("expected PORT/PROTOCOL, got '{s}'"));
        };
        let port: u16 = parse_port(port_str).map_err(|e| e.to_string())?;
        let protocol: Protocol = proto_str.parse()?;
        Ok(Self::new(port, protocol))
    }
}

/// Parses a decimal port number in `[1, 65535]`.
pub fn parse_port(text: &str) -> Result<u16, ParseError> {
    let text: &str = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPort(text.to_string()));
    }

    match text.parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(ParseError::InvalidPort(text.to_string())),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
