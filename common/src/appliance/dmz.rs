//! # DMZ Port Forwarding
//!
//! A destination forwards one port/protocol pair to a single host on the DMZ
//! VLAN.

use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

use crate::network::cidr::Ipv4Cidr;
use crate::network::ipv4::parse_ipv4;
use crate::network::port::{PortError, Protocol, ProtocolError, parse_port};
use crate::network::range::describe_hosts;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DmzError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' must be a bare address without a mask, e.g. 192.168.2.10")]
    HasMask(String),
    #[error("invalid IP '{0}'")]
    InvalidIp(String),
    #[error("{0} cannot end in 0 or 255")]
    ReservedHost(Ipv4Addr),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("{ip} is outside the DMZ network {network} (hosts {})", describe_hosts(.network))]
    OutsideDmz { ip: Ipv4Addr, network: Ipv4Cidr },
    #[error("port {port}/{protocol} is already forwarded to {ip}")]
    PortInUse {
        port: u16,
        protocol: Protocol,
        ip: Ipv4Addr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DmzDestination {
    pub ip: Ipv4Addr,
    pub port: u16,
    pub protocol: Protocol,
}

impl DmzDestination {
    pub fn parse(ip: &str, port: &str, protocol: &str) -> Result<Self, DmzError> {
        let (ip, port, protocol) = (ip.trim(), port.trim(), protocol.trim());

        for (field, value) in [("IP", ip), ("port", port), ("protocol", protocol)] {
            if value.is_empty() {
                return Err(DmzError::MissingField(field));
            }
        }

        if ip.contains('/') {
            return Err(DmzError::HasMask(ip.to_string()));
        }
        let addr: Ipv4Addr = parse_ipv4(ip).ok_or_else(|| DmzError::InvalidIp(ip.to_string()))?;
        if matches!(addr.octets()[3], 0 | 255) {
            return Err(DmzError::ReservedHost(addr));
        }

        Ok(Self {
            ip: addr,
            port: parse_port(port)?,
            protocol: protocol.parse()?,
        })
    }

    /// The destination must be a host of the DMZ VLAN.
    pub fn check_network(&self, dmz: &Ipv4Cidr) -> Result<(), DmzError> {
        let as_host = Ipv4Cidr::new(self.ip, dmz.prefix()).ok();
        if dmz.contains(self.ip) && as_host.is_some_and(|cidr| cidr.is_host()) {
            return Ok(());
        }
        Err(DmzError::OutsideDmz {
            ip: self.ip,
            network: *dmz,
        })
    }

    /// A port/protocol pair may only point at one host. Re-adding the same
    /// destination is not a conflict.
    pub fn check_conflicts(&self, existing: &[DmzDestination]) -> Result<(), DmzError> {
        match existing
            .iter()
            .find(|d| d.port == self.port && d.protocol == self.protocol && d.ip != self.ip)
        {
            Some(taken) => Err(DmzError::PortInUse {
                port: taken.port,
                protocol: taken.protocol,
                ip: taken.ip,
            }),
            None => Ok(()),
        }
    }
}
