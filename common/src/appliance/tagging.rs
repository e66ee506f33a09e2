//! # 802.1Q Tagging
//!
//! A physical port joins the bridge either untagged on a single VLAN (access
//! port) or tagged on a list of VLANs (trunk). Mixing both on one port is
//! refused.

use thiserror::Error;

use crate::network::interface::{InterfaceNameError, validate_interface_name};

use super::vlan::{VlanError, VlanId, VlanList};

/// The bridge every tagged port is enslaved to.
pub const BRIDGE_NAME: &str = "br0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaggingError {
    #[error(transparent)]
    InterfaceName(#[from] InterfaceNameError),
    #[error("'{0}': br0 and its sub-interfaces cannot be tagged")]
    BridgeReserved(String),
    #[error("interface {0}: give an untagged VLAN or a tagged VLAN list")]
    MissingMode(String),
    #[error("interface {name}: cannot be untagged on VLAN {untag} and tagged on {tag} at once")]
    Conflict {
        name: String,
        untag: VlanId,
        tag: VlanList,
    },
    #[error(transparent)]
    Vlan(#[from] VlanError),
    #[error("VLAN {0} does not exist, configure it first")]
    UnknownVlan(VlanId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortMode {
    /// Untagged member of one VLAN.
    Access(VlanId),
    /// Tagged member of every listed VLAN.
    Trunk(VlanList),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingPort {
    pub name: String,
    pub mode: PortMode,
}

impl TaggingPort {
    /// Builds a port from raw form fields; blank fields count as absent.
    pub fn parse(name: &str, vlan_untag: &str, vlan_tag: &str) -> Result<Self, TaggingError> {
        let name: &str = name.trim();
        validate_interface_name(name)?;

        if name == BRIDGE_NAME || name.starts_with(&format!("{BRIDGE_NAME}.")) {
            return Err(TaggingError::BridgeReserved(name.to_string()));
        }

        let untag: Option<VlanId> = match vlan_untag.trim() {
            "" => None,
            s => Some(s.parse()?),
        };
        let tag: Option<VlanList> = match vlan_tag.trim() {
            "" => None,
            s => Some(s.parse()?),
        };

        let mode: PortMode = match (untag, tag) {
            (Some(untag), None) => PortMode::Access(untag),
            (None, Some(tag)) => PortMode::Trunk(tag),
            (Some(untag), Some(tag)) => {
                return Err(TaggingError::Conflict {
                    name: name.to_string(),
                    untag,
                    tag,
                });
            }
            (None, None) => return Err(TaggingError::MissingMode(name.to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            mode,
        })
    }

    /// Every VLAN the port references must already exist.
    ///
    /// An empty `configured` list means the VLAN table is unknown and the
    /// check is skipped.
    pub fn check_known(&self, configured: &[VlanId]) -> Result<(), TaggingError> {
        if configured.is_empty() {
            return Ok(());
        }

        let referenced: &[VlanId] = match &self.mode {
            PortMode::Access(id) => std::slice::from_ref(id),
            PortMode::Trunk(list) => list.ids(),
        };

        match referenced.iter().find(|id| !configured.contains(id)) {
            Some(missing) => Err(TaggingError::UnknownVlan(*missing)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u16) -> VlanId {
        VlanId::new(n).unwrap()
    }

    #[test]
    fn test_access_and_trunk_ports() {
        let port = TaggingPort::parse("eth1", "10", "").unwrap();
        assert_eq!(port.mode, PortMode::Access(id(10)));

        let port = TaggingPort::parse(" eth2 ", "", "10, 20-22").unwrap();
        assert_eq!(port.name, "eth2");
        match port.mode {
            PortMode::Trunk(list) => assert_eq!(list.to_string(), "10,20-22"),
            other => panic!("expected trunk, got {other:?}"),
        }
    }

    #[test]
    fn test_port_errors() {
        assert_eq!(
            TaggingPort::parse("br0", "10", ""),
            Err(TaggingError::BridgeReserved("br0".into()))
        );
        assert_eq!(
            TaggingPort::parse("br0.10", "10", ""),
            Err(TaggingError::BridgeReserved("br0.10".into()))
        );
        assert!(TaggingPort::parse("br01", "10", "").is_ok());

        assert_eq!(
            TaggingPort::parse("eth1", "", ""),
            Err(TaggingError::MissingMode("eth1".into()))
        );
        assert!(matches!(
            TaggingPort::parse("eth1", "10", "20,30"),
            Err(TaggingError::Conflict { .. })
        ));
        assert!(matches!(
            TaggingPort::parse("eth1", "5000", ""),
            Err(TaggingError::Vlan(VlanError::OutOfRange(_)))
        ));
        assert!(matches!(
            TaggingPort::parse("eth 1", "10", ""),
            Err(TaggingError::InterfaceName(_))
        ));
    }

    #[test]
    fn test_check_known() {
        let configured = [id(1), id(2), id(10), id(20)];

        let port = TaggingPort::parse("eth1", "", "10,20").unwrap();
        assert_eq!(port.check_known(&configured), Ok(()));

        let port = TaggingPort::parse("eth1", "", "10-12").unwrap();
        assert_eq!(port.check_known(&configured), Err(TaggingError::UnknownVlan(id(11))));

        let port = TaggingPort::parse("eth1", "99", "").unwrap();
        assert_eq!(port.check_known(&[]), Ok(()));
    }
}
