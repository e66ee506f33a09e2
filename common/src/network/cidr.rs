//! # CIDR Blocks
//!
//! Parsing and arithmetic for `address/prefix` strings such as
//! `192.168.1.1/24`.
//!
//! All masking happens on `u32` values. Prefix length 0 is rejected: a VLAN
//! network always has to be narrower than the whole address space.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use super::ipv4::{self, is_digits};

pub const MIN_PREFIX: u8 = 1;
pub const MAX_PREFIX: u8 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("missing '/prefix' in '{0}'")]
    MissingPrefix(String),
    #[error("expected a single '/' in '{0}'")]
    TooManySlashes(String),
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
    #[error("invalid prefix length '{0}'")]
    InvalidPrefix(String),
    #[error("prefix length {0} is outside 1..=32")]
    PrefixOutOfRange(String),
}

/// What an `address/prefix` pair denotes inside its own block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkRole {
    /// Host bits all zero (`192.168.1.0/24`). A `/32` is always this.
    Network,
    /// A usable host address (`192.168.1.1/24`).
    Host,
    /// Host bits all one (`192.168.1.255/24`).
    Broadcast,
}

/// An IPv4 address together with a prefix length in `1..=32`.
///
/// The address keeps its host bits; use [`Ipv4Cidr::network`] for the
/// normalised block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    pub fn new(address: Ipv4Addr, prefix: u8) -> Result<Self, CidrError> {
        if !(MIN_PREFIX..=MAX_PREFIX).contains(&prefix) {
            return Err(CidrError::PrefixOutOfRange(prefix.to_string()));
        }
        Ok(Self { address, prefix })
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn mask(&self) -> u32 {
        mask(self.prefix)
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(network_address(u32::from(self.address), self.prefix))
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(broadcast_address(u32::from(self.address), self.prefix))
    }

    pub fn role(&self) -> NetworkRole {
        if self.address == self.network() {
            NetworkRole::Network
        } else if self.address == self.broadcast() {
            NetworkRole::Broadcast
        } else {
            NetworkRole::Host
        }
    }

    pub fn is_network(&self) -> bool {
        self.role() == NetworkRole::Network
    }

    pub fn is_host(&self) -> bool {
        self.role() == NetworkRole::Host
    }

    /// True when `addr` masked with this block's prefix lands on its network.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        network_address(u32::from(addr), self.prefix) == u32::from(self.network())
    }
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let addr_str: &str = parts.next().unwrap_or_default();
        let Some(prefix_str) = parts.next() else {
            return Err(CidrError::MissingPrefix(s.to_string()));
        };
        if parts.next().is_some() {
            return Err(CidrError::TooManySlashes(s.to_string()));
        }

        let address: Ipv4Addr = ipv4::parse_ipv4(addr_str)
            .ok_or_else(|| CidrError::InvalidAddress(addr_str.to_string()))?;
        let prefix: u8 = parse_prefix(prefix_str)?;

        Self::new(address, prefix)
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

fn parse_prefix(s: &str) -> Result<u8, CidrError> {
    if !is_digits(s) {
        return Err(CidrError::InvalidPrefix(s.to_string()));
    }
    match s.parse::<u8>() {
        Ok(prefix) if (MIN_PREFIX..=MAX_PREFIX).contains(&prefix) => Ok(prefix),
        _ => Err(CidrError::PrefixOutOfRange(s.to_string())),
    }
}

/// The 32-bit value with the top `prefix` bits set. Total: 0 for prefix 0,
/// all ones for anything from 32 up.
pub fn mask(prefix: u8) -> u32 {
    let host_bits: u32 = 32 - u32::from(prefix.min(MAX_PREFIX));
    u32::MAX.checked_shl(host_bits).unwrap_or(0)
}

pub fn network_address(addr: u32, prefix: u8) -> u32 {
    addr & mask(prefix)
}

pub fn broadcast_address(addr: u32, prefix: u8) -> u32 {
    network_address(addr, prefix) | !mask(prefix)
}

pub fn parse_cidr(s: &str) -> Result<Ipv4Cidr, CidrError> {
    s.parse()
}

pub fn is_valid_cidr(s: &str) -> bool {
    parse_cidr(s).is_ok()
}

pub fn is_network_address(s: &str) -> bool {
    parse_cidr(s).is_ok_and(|cidr| cidr.is_network())
}

pub fn is_host_address(s: &str) -> bool {
    parse_cidr(s).is_ok_and(|cidr| cidr.is_host())
}

pub fn same_mask(a: &str, b: &str) -> bool {
    match (parse_cidr(a), parse_cidr(b)) {
        (Ok(a), Ok(b)) => a.prefix() == b.prefix(),
        _ => false,
    }
}

/// Checks that the address part of `host` belongs to `network`.
///
/// Only `network`'s prefix is used; `host` may carry any prefix or none at
/// all (`192.168.1.10` and `192.168.1.10/16` behave the same).
pub fn address_in_network(host: &str, network: &str) -> bool {
    let Ok(network) = parse_cidr(network) else {
        return false;
    };
    let address: &str = host.split_once('/').map_or(host, |(address, _)| address);
    let host_addr: Option<Ipv4Addr> = ipv4::parse_ipv4(address);

    host_addr.is_some_and(|addr| network.contains(addr))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
