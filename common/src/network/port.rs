//! Transport protocols and port numbers as typed into the dashboard forms.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::ipv4::is_digits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid protocol '{0}', use tcp or udp")]
pub struct ProtocolError(pub String);

impl FromStr for Protocol {
    type Err = ProtocolError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            _ => Err(ProtocolError(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port required after ':'")]
    Required,
    #[error("invalid port '{0}'")]
    Invalid(String),
    #[error("port {0} is outside 1..=65535")]
    OutOfRange(String),
}

/// Parses a decimal port in `1..=65535`.
///
/// Anything made only of digits but too large, including values that do not
/// fit any integer type, is reported as out of range rather than invalid.
pub fn parse_port(s: &str) -> Result<u16, PortError> {
    if s.is_empty() {
        return Err(PortError::Required);
    }
    if !is_digits(s) {
        return Err(PortError::Invalid(s.to_string()));
    }
    match s.parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(PortError::OutOfRange(s.to_string())),
    }
}
