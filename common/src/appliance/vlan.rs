//! # VLAN Settings
//!
//! VLAN identifiers, the comma/range lists used by 802.1Q tagging, and the
//! address pair every VLAN interface is configured with.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::network::ipv4::is_digits;
use crate::network::pair::{InterfacePair, InterfacePairError, validate_interface_pair};

pub const MIN_VLAN_ID: u16 = 1;
pub const MAX_VLAN_ID: u16 = 4094;

/// Pre-configured VLANs that can be edited but never created or removed.
pub const PROTECTED_VLANS: [VlanId; 2] = [VlanId(1), VlanId(2)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlanError {
    #[error("VLAN id cannot be empty")]
    Empty,
    #[error("VLAN id '{0}' is not a number")]
    NotANumber(String),
    #[error("VLAN id {0} is outside 1..=4094")]
    OutOfRange(String),
    #[error("VLAN {0} is protected and pre-configured")]
    Protected(VlanId),
    #[error("invalid VLAN range '{0}', expected something like 3-10")]
    InvalidRange(String),
    #[error("no VLANs given, expected something like 1,2,3-10,12")]
    EmptyList,
    #[error(transparent)]
    Pair(#[from] InterfacePairError),
}

/// An 802.1Q VLAN identifier in `1..=4094`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VlanId(u16);

impl VlanId {
    pub fn new(id: u16) -> Result<Self, VlanError> {
        if (MIN_VLAN_ID..=MAX_VLAN_ID).contains(&id) {
            Ok(Self(id))
        } else {
            Err(VlanError::OutOfRange(id.to_string()))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn is_protected(self) -> bool {
        PROTECTED_VLANS.contains(&self)
    }
}

impl FromStr for VlanId {
    type Err = VlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();
        if s.is_empty() {
            return Err(VlanError::Empty);
        }
        if !is_digits(s) {
            return Err(VlanError::NotANumber(s.to_string()));
        }
        let id: u16 = s
            .parse()
            .map_err(|_| VlanError::OutOfRange(s.to_string()))?;
        Self::new(id)
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sorted, de-duplicated set of VLAN ids written as `1,2,3-10,12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VlanList(Vec<VlanId>);

impl VlanList {
    pub fn ids(&self) -> &[VlanId] {
        &self.0
    }

    pub fn contains(&self, id: VlanId) -> bool {
        self.0.binary_search(&id).is_ok()
    }
}

impl FromStr for VlanList {
    type Err = VlanError;

    /// Blank items (`1,,2`) are skipped; ranges are inclusive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ids: Vec<VlanId> = Vec::new();

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.split_once('-') {
                Some((start, end)) => {
                    let start: VlanId = start.parse()?;
                    let end: VlanId = end.parse()?;
                    if start > end {
                        return Err(VlanError::InvalidRange(item.to_string()));
                    }
                    ids.extend((start.get()..=end.get()).map(VlanId));
                }
                None => ids.push(item.parse()?),
            }
        }

        if ids.is_empty() {
            return Err(VlanError::EmptyList);
        }

        ids.sort_unstable();
        ids.dedup();
        Ok(Self(ids))
    }
}

impl fmt::Display for VlanList {
    /// Collapses consecutive ids back into ranges.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut i = 0;

        while i < self.0.len() {
            let start: u16 = self.0[i].get();
            let mut end: u16 = start;
            while i + 1 < self.0.len() && self.0[i + 1].get() == end + 1 {
                end += 1;
                i += 1;
            }

            if !first {
                f.write_str(",")?;
            }
            first = false;

            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
            i += 1;
        }
        Ok(())
    }
}

/// A VLAN row as entered in the VLAN table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanConfig {
    pub id: VlanId,
    pub name: String,
    pub ip_interface: String,
    pub ip_network: String,
}

impl VlanConfig {
    /// Validation for a VLAN being created: protected ids are refused.
    pub fn validate_new(&self) -> Result<InterfacePair, VlanError> {
        if self.id.is_protected() {
            return Err(VlanError::Protected(self.id));
        }
        self.validate_edit()
    }

    /// Validation for an existing row, protected VLANs included.
    pub fn validate_edit(&self) -> Result<InterfacePair, VlanError> {
        Ok(validate_interface_pair(
            &self.name,
            &self.ip_interface,
            &self.ip_network,
        )?)
    }
}

/// Refuses to remove a protected VLAN.
pub fn check_removable(id: VlanId) -> Result<(), VlanError> {
    if id.is_protected() {
        return Err(VlanError::Protected(id));
    }
    Ok(())
}
