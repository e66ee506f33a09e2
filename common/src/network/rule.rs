//! # Whitelist Rules
//!
//! Parses the compact destination syntax of the firewall allow-list.
//!
//! A rule names an IPv4 host, a port, a protocol or a combination:
//! * `8.8.8.8`, `8.8.8.8/tcp`
//! * `192.168.1.1:80`, `8.8.8.8:53/udp`
//! * `:443`, `:22/tcp` (any address)
//! * `/tcp` (any address and port)
//!
//! Every rejection carries a [`RuleErrorKind`], and the front ends show the
//! message verbatim, so the variants are part of the public contract.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use super::ipv4::{looks_like_ipv6, parse_ipv4};
use super::port::{PortError, Protocol, parse_port};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleErrorKind {
    Empty,
    /// Structural problem: more than one `/` or `:`.
    Malformed,
    InvalidProtocol,
    InvalidPort,
    PortOutOfRange,
    InvalidIp,
    Ipv6Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("empty rule")]
    Empty,
    #[error("invalid format")]
    Malformed,
    #[error("invalid protocol '{0}', use tcp or udp")]
    InvalidProtocol(String),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("IP required")]
    IpRequired,
    #[error("invalid IP '{0}'")]
    InvalidIp(String),
    #[error("IPv6 is not supported yet ('{0}')")]
    Ipv6Unsupported(String),
}

impl RuleError {
    pub fn kind(&self) -> RuleErrorKind {
        match self {
            Self::Empty => RuleErrorKind::Empty,
            Self::Malformed => RuleErrorKind::Malformed,
            Self::InvalidProtocol(_) => RuleErrorKind::InvalidProtocol,
            Self::Port(PortError::OutOfRange(_)) => RuleErrorKind::PortOutOfRange,
            Self::Port(PortError::Required | PortError::Invalid(_)) => RuleErrorKind::InvalidPort,
            Self::IpRequired | Self::InvalidIp(_) => RuleErrorKind::InvalidIp,
            Self::Ipv6Unsupported(_) => RuleErrorKind::Ipv6Unsupported,
        }
    }
}

/// A parsed allow-list entry. At least one field is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WhitelistRule {
    pub ip: Option<Ipv4Addr>,
    pub port: Option<u16>,
    pub proto: Option<Protocol>,
}

impl FromStr for WhitelistRule {
    type Err = RuleError;

    /// Parses a rule; see the module docs for the accepted shapes.
    ///
    /// Checks run in a fixed order so that the error names the first
    /// problem: emptiness, the `/proto` suffix, the port, then the address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err(RuleError::Empty);
        }

        let (base, proto) = split_protocol(trimmed)?;

        if base.is_empty() {
            // A '/' was present, otherwise `trimmed` would not be empty.
            return Ok(WhitelistRule {
                ip: None,
                port: None,
                proto,
            });
        }

        if looks_like_ipv6(base) {
            return Err(RuleError::Ipv6Unsupported(base.to_string()));
        }

        if let Some(port_str) = base.strip_prefix(':') {
            let port: u16 = parse_port(port_str.trim())?;
            return Ok(WhitelistRule {
                ip: None,
                port: Some(port),
                proto,
            });
        }

        let (ip_str, port) = split_port(base)?;
        let ip: Ipv4Addr = parse_rule_ip(ip_str)?;

        Ok(WhitelistRule {
            ip: Some(ip),
            port,
            proto,
        })
    }
}

impl fmt::Display for WhitelistRule {
    /// Canonical form: lowercase protocol, no whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ip) = self.ip {
            write!(f, "{ip}")?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        if let Some(proto) = self.proto {
            write!(f, "/{proto}")?;
        }
        Ok(())
    }
}

pub fn validate_rule(s: &str) -> Result<WhitelistRule, RuleError> {
    s.parse()
}

pub fn is_valid_rule(s: &str) -> bool {
    validate_rule(s).is_ok()
}

/// Splits `base/proto`. Without a '/', the whole input is the base.
fn split_protocol(s: &str) -> Result<(&str, Option<Protocol>), RuleError> {
    let Some((base, proto_str)) = s.split_once('/') else {
        return Ok((s, None));
    };
    if proto_str.contains('/') {
        return Err(RuleError::Malformed);
    }

    let proto: Protocol = proto_str
        .parse()
        .map_err(|_| RuleError::InvalidProtocol(proto_str.trim().to_string()))?;

    Ok((base.trim(), Some(proto)))
}

/// Splits `ip[:port]`, validating the port when one is present.
fn split_port(base: &str) -> Result<(&str, Option<u16>), RuleError> {
    let Some((ip_str, port_str)) = base.split_once(':') else {
        return Ok((base, None));
    };
    if port_str.contains(':') {
        return Err(RuleError::Malformed);
    }

    let port: u16 = parse_port(port_str.trim())?;
    Ok((ip_str.trim(), Some(port)))
}

fn parse_rule_ip(s: &str) -> Result<Ipv4Addr, RuleError> {
    if s.is_empty() {
        return Err(RuleError::IpRequired);
    }
    parse_ipv4(s).ok_or_else(|| RuleError::InvalidIp(s.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
