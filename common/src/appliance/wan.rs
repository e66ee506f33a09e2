//! # WAN Uplink
//!
//! The uplink is either configured by DHCP or by hand. Manual settings are
//! checked as a unit: the gateway has to live on the same network as the
//! address.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::network::cidr::{CidrError, Ipv4Cidr};
use crate::network::interface::{InterfaceNameError, validate_interface_name};
use crate::network::ipv4::parse_ipv4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WanError {
    #[error("invalid WAN interface: {0}")]
    Interface(#[from] InterfaceNameError),
    #[error("invalid mode '{0}', use manual or dhcp")]
    InvalidMode(String),
    #[error("missing '{0}' for manual mode")]
    MissingField(&'static str),
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },
    #[error("invalid mask: {0}")]
    InvalidMask(CidrError),
    #[error("{0} is the network or broadcast address of its network")]
    NotHostAddress(Ipv4Cidr),
    #[error("gateway {gateway} is outside {network}")]
    GatewayOutsideNetwork { gateway: Ipv4Addr, network: Ipv4Cidr },
    #[error("gateway {0} is the network or broadcast address")]
    GatewayReserved(Ipv4Addr),
    #[error("gateway cannot be the WAN address itself")]
    GatewayIsAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WanSettings {
    Dhcp {
        interface: String,
    },
    Manual {
        interface: String,
        address: Ipv4Cidr,
        gateway: Ipv4Addr,
        dns: Vec<Ipv4Addr>,
    },
}

impl WanSettings {
    pub fn dhcp(interface: &str) -> Result<Self, WanError> {
        let interface: &str = interface.trim();
        validate_interface_name(interface)?;
        Ok(Self::Dhcp {
            interface: interface.to_string(),
        })
    }

    /// `mask` is a prefix length; `dns` is a comma-separated server list.
    pub fn manual(
        interface: &str,
        ip: &str,
        mask: &str,
        gateway: &str,
        dns: &str,
    ) -> Result<Self, WanError> {
        let interface: &str = interface.trim();
        let (ip, mask, gateway) = (ip.trim(), mask.trim(), gateway.trim());

        for (field, value) in [("ip", ip), ("mask", mask), ("gateway", gateway), ("dns", dns.trim())] {
            if value.is_empty() {
                return Err(WanError::MissingField(field));
            }
        }

        let ip_addr: Ipv4Addr = parse_address("ip", ip)?;
        let gateway: Ipv4Addr = parse_address("gateway", gateway)?;
        let dns: Vec<Ipv4Addr> = dns
            .split(',')
            .map(str::trim)
            .filter(|server| !server.is_empty())
            .map(|server| parse_address("dns", server))
            .collect::<Result<_, _>>()?;
        if dns.is_empty() {
            return Err(WanError::MissingField("dns"));
        }

        let address: Ipv4Cidr = format!("{ip_addr}/{mask}")
            .parse()
            .map_err(WanError::InvalidMask)?;

        check_gateway(&address, gateway)?;
        validate_interface_name(interface)?;

        Ok(Self::Manual {
            interface: interface.to_string(),
            address,
            gateway,
            dns,
        })
    }

    /// Dispatches on the `mode` field of the WAN form. Manual-only fields are
    /// ignored in DHCP mode.
    pub fn from_form(
        mode: &str,
        interface: &str,
        ip: &str,
        mask: &str,
        gateway: &str,
        dns: &str,
    ) -> Result<Self, WanError> {
        match mode.trim() {
            "dhcp" => Self::dhcp(interface),
            "manual" => Self::manual(interface, ip, mask, gateway, dns),
            other => Err(WanError::InvalidMode(other.to_string())),
        }
    }

    pub fn interface(&self) -> &str {
        match self {
            Self::Dhcp { interface } | Self::Manual { interface, .. } => interface,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Dhcp { .. } => "dhcp",
            Self::Manual { .. } => "manual",
        }
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Ipv4Addr, WanError> {
    parse_ipv4(value).ok_or_else(|| WanError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

fn check_gateway(address: &Ipv4Cidr, gateway: Ipv4Addr) -> Result<(), WanError> {
    if !address.is_host() {
        return Err(WanError::NotHostAddress(*address));
    }

    if !address.contains(gateway) {
        return Err(WanError::GatewayOutsideNetwork {
            gateway,
            network: Ipv4Cidr::new(address.network(), address.prefix())
                .map_err(WanError::InvalidMask)?,
        });
    }

    if gateway == address.network() || gateway == address.broadcast() {
        return Err(WanError::GatewayReserved(gateway));
    }

    if gateway == address.address() {
        return Err(WanError::GatewayIsAddress);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dhcp() {
        let wan = WanSettings::dhcp("eth0").unwrap();
        assert_eq!(wan.mode(), "dhcp");
        assert_eq!(wan.interface(), "eth0");
        assert!(WanSettings::dhcp("").is_err());
    }

    #[test]
    fn test_from_form() {
        assert!(matches!(
            WanSettings::from_form("dhcp", "eth0", "garbage", "", "", ""),
            Ok(WanSettings::Dhcp { .. })
        ));
        assert_eq!(
            WanSettings::from_form("pppoe", "eth0", "", "", "", ""),
            Err(WanError::InvalidMode("pppoe".into()))
        );
    }

    #[test]
    fn test_manual_ok() {
        let wan = WanSettings::manual("eth0", "203.0.113.10", "24", "203.0.113.1", "1.1.1.1, 8.8.8.8")
            .unwrap();
        match wan {
            WanSettings::Manual { address, gateway, dns, .. } => {
                assert_eq!(address.to_string(), "203.0.113.10/24");
                assert_eq!(gateway, Ipv4Addr::new(203, 0, 113, 1));
                assert_eq!(dns.len(), 2);
            }
            other => panic!("expected manual settings, got {other:?}"),
        }
    }

    #[test]
    fn test_manual_errors() {
        let manual = |ip, mask, gw, dns| WanSettings::manual("eth0", ip, mask, gw, dns);

        assert_eq!(manual("", "24", "1.1.1.1", "1.1.1.1"), Err(WanError::MissingField("ip")));
        assert_eq!(manual("10.0.0.2", "24", "10.0.0.1", ""), Err(WanError::MissingField("dns")));
        assert!(matches!(
            manual("10.0.0.300", "24", "10.0.0.1", "1.1.1.1"),
            Err(WanError::InvalidAddress { field: "ip", .. })
        ));
        assert!(matches!(
            manual("10.0.0.2", "24", "10.0.0.1", "1.1.1.1,nope"),
            Err(WanError::InvalidAddress { field: "dns", .. })
        ));
        assert!(matches!(
            manual("10.0.0.2", "0", "10.0.0.1", "1.1.1.1"),
            Err(WanError::InvalidMask(CidrError::PrefixOutOfRange(_)))
        ));
        assert!(matches!(
            manual("10.0.0.0", "24", "10.0.0.1", "1.1.1.1"),
            Err(WanError::NotHostAddress(_))
        ));
        assert!(matches!(
            manual("10.0.0.2", "24", "10.0.1.1", "1.1.1.1"),
            Err(WanError::GatewayOutsideNetwork { .. })
        ));
        assert_eq!(
            manual("10.0.0.2", "24", "10.0.0.255", "1.1.1.1"),
            Err(WanError::GatewayReserved(Ipv4Addr::new(10, 0, 0, 255)))
        );
        assert_eq!(
            manual("10.0.0.2", "24", "10.0.0.2", "1.1.1.1"),
            Err(WanError::GatewayIsAddress)
        );
    }
}
