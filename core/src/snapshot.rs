//! Typed views of the config files the appliance publishes under
//! `/config/<module>/<module>.json`. Records the server wrote but that no
//! longer validate are skipped rather than treated as fatal.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::appliance::vlan::VlanId;
use lanward_common::network::cidr::Ipv4Cidr;

/// The VLAN the DMZ lives on.
pub const DMZ_VLAN: u16 = 2;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VlanRecord {
    pub id: u16,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip_interface: Option<String>,
    #[serde(default)]
    pub ip_network: Option<String>,
    /// Older files carry the interface address here.
    #[serde(default)]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VlansFile {
    #[serde(default)]
    pub vlans: Vec<VlanRecord>,
}

impl VlansFile {
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parses the `message` of a `show` reply, which carries the VLAN list as
    /// JSON text. Plain text (e.g. "no VLANs") means an empty table.
    pub fn from_show_message(message: &str) -> anyhow::Result<Self> {
        let message: &str = message.trim();
        if !(message.starts_with('[') || message.starts_with('{')) {
            return Ok(Self::default());
        }

        let vlans: Vec<VlanRecord> = match serde_json::from_str::<Value>(message)? {
            Value::Array(items) => serde_json::from_value(Value::Array(items))?,
            _ => Vec::new(),
        };
        Ok(Self { vlans })
    }

    /// Sorted ids of every configured VLAN.
    pub fn ids(&self) -> Vec<VlanId> {
        let mut ids: Vec<VlanId> = self
            .vlans
            .iter()
            .filter_map(|vlan| VlanId::new(vlan.id).ok())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Network of the DMZ VLAN, if it is configured.
    pub fn dmz_network(&self) -> Option<Ipv4Cidr> {
        let vlan: &VlanRecord = self.vlans.iter().find(|vlan| vlan.id == DMZ_VLAN)?;
        [&vlan.ip_network, &vlan.ip_interface, &vlan.ip]
            .into_iter()
            .flatten()
            .find_map(|cidr| cidr.trim().parse::<Ipv4Cidr>().ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirewallVlan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub isolated: bool,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub whitelist_enabled: bool,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirewallFile {
    /// `1` (or `"1"`) while the firewall runs.
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub vlans: BTreeMap<String, FirewallVlan>,
}

impl FirewallFile {
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_active(&self) -> bool {
        match &self.status {
            Value::Number(n) => n.as_i64() == Some(1),
            Value::String(s) => s.trim() == "1",
            _ => false,
        }
    }

    pub fn vlan(&self, id: VlanId) -> Option<&FirewallVlan> {
        self.vlans.get(&id.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DmzFile {
    #[serde(default)]
    pub destinations: Vec<Value>,
}

impl DmzFile {
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Forwarded destinations that still parse.
    pub fn destinations(&self) -> Vec<DmzDestination> {
        self.destinations
            .iter()
            .filter_map(|entry| {
                let ip: &str = entry.get("ip")?.as_str()?;
                let port: String = match entry.get("port")? {
                    Value::String(port) => port.clone(),
                    other => other.to_string(),
                };
                let protocol: &str = entry.get("protocol")?.as_str()?;
                DmzDestination::parse(ip, &port, protocol).ok()
            })
            .collect()
    }
}
