//! # Admin Commands
//!
//! Builders for every request the dashboard can send. Each builder takes
//! input that has already been through the validators in `lanward-common`
//! (or runs them itself), so an [`AdminCommand`] is always well formed.

use anyhow::Context;
use serde_json::json;

use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::appliance::tagging::{PortMode, TaggingPort};
use lanward_common::appliance::vlan::{VlanConfig, VlanId, check_removable};
use lanward_common::appliance::wan::WanSettings;
use lanward_common::network::interface::validate_interface_name;
use lanward_common::network::rule::{WhitelistRule, validate_rule};

use crate::api::{AdminRequest, Module};

/// A request bound to the module endpoint it goes to.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCommand {
    pub module: Module,
    pub request: AdminRequest,
}

impl AdminCommand {
    fn new(module: Module, request: AdminRequest) -> Self {
        Self { module, request }
    }

    /// Pretty JSON body, as printed by dry runs.
    pub fn body(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.request).context("serializing admin request")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Stop,
    Restart,
    Status,
}

impl Lifecycle {
    pub fn action(self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::Stop => "stop",
            Lifecycle::Restart => "restart",
            Lifecycle::Status => "status",
        }
    }
}

pub fn lifecycle(module: Module, lifecycle: Lifecycle) -> AdminCommand {
    AdminCommand::new(module, AdminRequest::bare(lifecycle.action()))
}

// ── VLANs ───────────────────────────────────────────────────────────────────

/// Adds a VLAN, or overwrites it when `existing` is set. New VLANs may not
/// use a protected id.
pub fn vlan_add(vlan: &VlanConfig, existing: bool) -> anyhow::Result<AdminCommand> {
    let pair = if existing {
        vlan.validate_edit()?
    } else {
        vlan.validate_new()?
    };

    let params = json!({
        "action": "add",
        "id": vlan.id,
        "name": vlan.name,
        "ip_interface": pair.interface.to_string(),
        "ip_network": pair.network.to_string(),
    });
    Ok(AdminCommand::new(
        Module::Vlans,
        AdminRequest::with_params("config", params),
    ))
}

pub fn vlan_remove(id: VlanId) -> anyhow::Result<AdminCommand> {
    check_removable(id)?;
    let params = json!({ "action": "remove", "id": id });
    Ok(AdminCommand::new(
        Module::Vlans,
        AdminRequest::with_params("config", params),
    ))
}

pub fn vlan_show() -> AdminCommand {
    let params = json!({ "action": "show", "format": "json" });
    AdminCommand::new(Module::Vlans, AdminRequest::with_params("config", params))
}

// ── Firewall ────────────────────────────────────────────────────────────────

/// VLAN 1 is isolated automatically when the firewall starts.
const AUTO_ISOLATED_VLAN: u16 = 1;

fn firewall(action: &str, params: serde_json::Value) -> AdminCommand {
    AdminCommand::new(Module::Firewall, AdminRequest::with_params(action, params))
}

fn ensure_whitelist_vlan(vlan: VlanId) -> anyhow::Result<()> {
    if vlan.is_protected() {
        anyhow::bail!("VLAN {vlan} uses isolation and restriction only, it has no whitelist");
    }
    Ok(())
}

/// Adds one allow-list entry; the rule is sent in canonical form.
pub fn firewall_add_rule(vlan: VlanId, rule: &str) -> anyhow::Result<AdminCommand> {
    ensure_whitelist_vlan(vlan)?;
    let rule: WhitelistRule = validate_rule(rule)?;
    Ok(firewall(
        "add_rule",
        json!({ "vlan_id": vlan, "rule": rule.to_string() }),
    ))
}

/// Removes an entry exactly as the server stored it, so the text is only
/// trimmed, not re-validated.
pub fn firewall_remove_rule(vlan: VlanId, rule: &str) -> anyhow::Result<AdminCommand> {
    ensure_whitelist_vlan(vlan)?;
    let rule: &str = rule.trim();
    if rule.is_empty() {
        anyhow::bail!("empty rule");
    }
    Ok(firewall(
        "remove_rule",
        json!({ "vlan_id": vlan, "rule": rule }),
    ))
}

/// Turns the allow-list on or off, sending the full current list along.
pub fn firewall_whitelist(
    vlan: VlanId,
    enable: bool,
    rules: &[String],
) -> anyhow::Result<AdminCommand> {
    ensure_whitelist_vlan(vlan)?;
    let whitelist: Vec<String> = rules
        .iter()
        .map(|rule| {
            validate_rule(rule)
                .map(|parsed| parsed.to_string())
                .with_context(|| format!("rule '{rule}'"))
        })
        .collect::<anyhow::Result<_>>()?;

    let action = if enable {
        "enable_whitelist"
    } else {
        "disable_whitelist"
    };
    Ok(firewall(
        action,
        json!({ "vlan_id": vlan, "whitelist": whitelist }),
    ))
}

pub fn firewall_isolation(vlan: VlanId, isolate: bool) -> anyhow::Result<AdminCommand> {
    if vlan.get() == AUTO_ISOLATED_VLAN {
        anyhow::bail!("VLAN {vlan} is isolated automatically when the firewall starts and cannot be toggled");
    }
    let action = if isolate { "aislar" } else { "desaislar" };
    Ok(firewall(action, json!({ "vlan_id": vlan })))
}

pub fn firewall_restriction(vlan: VlanId, restrict: bool) -> AdminCommand {
    let action = if restrict { "restrict" } else { "unrestrict" };
    firewall(action, json!({ "vlan_id": vlan }))
}

pub fn firewall_reset_defaults() -> AdminCommand {
    firewall("reset_defaults", json!({}))
}

// ── DMZ / tagging / WAN ─────────────────────────────────────────────────────

pub fn dmz_add(destination: &DmzDestination) -> AdminCommand {
    AdminCommand::new(
        Module::Dmz,
        AdminRequest::with_params("add_destination", json!(destination)),
    )
}

pub fn tagging_add(port: &TaggingPort) -> AdminCommand {
    let (untag, tag) = match &port.mode {
        PortMode::Access(id) => (id.to_string(), String::new()),
        PortMode::Trunk(list) => (String::new(), list.to_string()),
    };
    let params = json!({
        "action": "add",
        "name": port.name,
        "vlan_untag": untag,
        "vlan_tag": tag,
    });
    AdminCommand::new(Module::Tagging, AdminRequest::with_params("config", params))
}

pub fn tagging_remove(name: &str) -> anyhow::Result<AdminCommand> {
    let name: &str = name.trim();
    validate_interface_name(name)?;
    let params = json!({ "action": "remove", "name": name });
    Ok(AdminCommand::new(
        Module::Tagging,
        AdminRequest::with_params("config", params),
    ))
}

pub fn wan_config(settings: &WanSettings) -> AdminCommand {
    let params = match settings {
        WanSettings::Dhcp { interface } => json!({
            "mode": "dhcp",
            "interface": interface,
        }),
        WanSettings::Manual {
            interface,
            address,
            gateway,
            dns,
        } => {
            let dns: Vec<String> = dns.iter().map(ToString::to_string).collect();
            json!({
                "mode": "manual",
                "interface": interface,
                "ip": address.address().to_string(),
                "mask": address.prefix(),
                "gateway": gateway.to_string(),
                "dns": dns.join(","),
            })
        }
    };
    AdminCommand::new(Module::Wan, AdminRequest::with_params("config", params))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
