//! # Interface / Network Pairs
//!
//! A VLAN is configured with two CIDR strings: the router's own address on
//! the VLAN (`192.168.10.1/24`) and the network it serves
//! (`192.168.10.0/24`). [`validate_interface_pair`] runs the checks in a
//! fixed order and reports the first one that fails, so the user always sees
//! the most basic problem first.

use std::net::Ipv4Addr;

use thiserror::Error;

use super::cidr::{CidrError, Ipv4Cidr};
use super::range::describe_hosts;

/// The six checks of [`validate_interface_pair`], in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PairCheck {
    Name,
    InterfaceFormat,
    InterfaceHost,
    NetworkAddress,
    SameMask,
    Containment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfacePairError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("interface address cannot be empty")]
    EmptyInterface,
    #[error("invalid interface address ({0}), expected something like 192.168.1.1/24")]
    InvalidInterface(CidrError),
    #[error("interface address {0} is the network or broadcast address, use a host address")]
    NotHostAddress(Ipv4Cidr),
    #[error("network address cannot be empty")]
    EmptyNetwork,
    #[error("'{0}' is not a network address, expected something like 192.168.1.0/24")]
    NotNetworkAddress(String),
    #[error("masks differ: interface /{interface}, network /{network}")]
    MaskMismatch { interface: u8, network: u8 },
    #[error("interface address {address} is outside {network} (hosts {})", describe_hosts(.network))]
    OutsideNetwork { address: Ipv4Addr, network: Ipv4Cidr },
}

impl InterfacePairError {
    pub fn check(&self) -> PairCheck {
        match self {
            Self::EmptyName => PairCheck::Name,
            Self::EmptyInterface | Self::InvalidInterface(_) => PairCheck::InterfaceFormat,
            Self::NotHostAddress(_) => PairCheck::InterfaceHost,
            Self::EmptyNetwork | Self::NotNetworkAddress(_) => PairCheck::NetworkAddress,
            Self::MaskMismatch { .. } => PairCheck::SameMask,
            Self::OutsideNetwork { .. } => PairCheck::Containment,
        }
    }
}

/// A pair that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfacePair {
    pub interface: Ipv4Cidr,
    pub network: Ipv4Cidr,
}

/// Runs the checks in order and stops at the first failure. A name made of
/// whitespace only counts as empty; the addresses are not trimmed.
pub fn validate_interface_pair(
    name: &str,
    interface: &str,
    network: &str,
) -> Result<InterfacePair, InterfacePairError> {
    if name.trim().is_empty() {
        return Err(InterfacePairError::EmptyName);
    }

    if interface.is_empty() {
        return Err(InterfacePairError::EmptyInterface);
    }
    let interface: Ipv4Cidr = interface
        .parse()
        .map_err(InterfacePairError::InvalidInterface)?;

    if !interface.is_host() {
        return Err(InterfacePairError::NotHostAddress(interface));
    }

    if network.is_empty() {
        return Err(InterfacePairError::EmptyNetwork);
    }
    let network: Ipv4Cidr = match network.parse::<Ipv4Cidr>() {
        Ok(cidr) if cidr.is_network() => cidr,
        _ => return Err(InterfacePairError::NotNetworkAddress(network.to_string())),
    };

    if interface.prefix() != network.prefix() {
        return Err(InterfacePairError::MaskMismatch {
            interface: interface.prefix(),
            network: network.prefix(),
        });
    }

    if !network.contains(interface.address()) {
        return Err(InterfacePairError::OutsideNetwork {
            address: interface.address(),
            network,
        });
    }

    Ok(InterfacePair { interface, network })
}
