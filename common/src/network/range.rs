//! # IPv4 Range Model
//!
//! Inclusive address ranges derived from a CIDR block, used to tell the user
//! which host addresses a network actually offers.

use std::fmt;
use std::net::Ipv4Addr;

use super::cidr::Ipv4Cidr;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses in the range.
    pub fn size(&self) -> u64 {
        let start: u64 = u64::from(u32::from(self.start_addr));
        let end: u64 = u64::from(u32::from(self.end_addr));
        (end + 1).saturating_sub(start)
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_addr, self.end_addr)
    }
}

/// Usable host addresses (network and broadcast stripped).
///
/// `None` for `/31` and `/32`, which have no room for a host.
pub fn host_range(cidr: &Ipv4Cidr) -> Option<Ipv4Range> {
    let net_u32: u32 = u32::from(cidr.network());
    let broadcast_u32: u32 = u32::from(cidr.broadcast());

    let start_u32 = net_u32.saturating_add(1);
    let end_u32 = broadcast_u32.saturating_sub(1);

    if start_u32 <= end_u32 {
        Some(Ipv4Range::new(
            Ipv4Addr::from(start_u32),
            Ipv4Addr::from(end_u32),
        ))
    } else {
        None
    }
}

/// Human readable host span of `cidr`, e.g. `192.168.1.1 - 192.168.1.254`.
pub fn describe_hosts(cidr: &Ipv4Cidr) -> String {
    match host_range(cidr) {
        Some(range) => range.to_string(),
        None => String::from("no usable hosts"),
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
