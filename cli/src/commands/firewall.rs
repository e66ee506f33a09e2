use anyhow::Context;
use colored::*;

use crate::commands::dispatch::{self, submit};
use crate::commands::{FirewallCommand, Toggle};
use crate::mprint;
use crate::terminal::{colors, format, print};
use lanward_common::appliance::vlan::VlanId;
use lanward_common::config::Config;
use lanward_common::warn;
use lanward_core::actions::{self, AdminCommand};
use lanward_core::api::Module;
use lanward_core::backend::AdminBackend;
use lanward_core::snapshot::FirewallFile;

pub async fn firewall(cmd: FirewallCommand, cfg: &Config) -> anyhow::Result<()> {
    let cmd: AdminCommand = match cmd {
        FirewallCommand::AddRule { vlan, rule } => actions::firewall_add_rule(vlan, &rule)?,
        FirewallCommand::RemoveRule { vlan, rule } => actions::firewall_remove_rule(vlan, &rule)?,
        FirewallCommand::Whitelist { vlan, state, rules } => {
            let rules: Vec<String> = if rules.is_empty() {
                stored_whitelist(vlan, cfg).await?
            } else {
                rules
            };
            actions::firewall_whitelist(vlan, state == Toggle::On, &rules)?
        }
        FirewallCommand::Isolate { vlan } => actions::firewall_isolation(vlan, true)?,
        FirewallCommand::Unisolate { vlan } => actions::firewall_isolation(vlan, false)?,
        FirewallCommand::Restrict { vlan } => actions::firewall_restriction(vlan, true),
        FirewallCommand::Unrestrict { vlan } => actions::firewall_restriction(vlan, false),
        FirewallCommand::Reset => actions::firewall_reset_defaults(),
        FirewallCommand::Show => return show(cfg).await,
    };
    submit(cmd, cfg).await
}

async fn load(cfg: &Config) -> anyhow::Result<FirewallFile> {
    let backend = dispatch::backend(cfg)?;
    let raw = backend.config(Module::Firewall).await?;
    FirewallFile::from_value(raw).context("decoding firewall config")
}

/// The whitelist the appliance currently holds for `vlan`, sent along when
/// toggling it. A dry run has nothing to read and sends an empty list.
async fn stored_whitelist(vlan: VlanId, cfg: &Config) -> anyhow::Result<Vec<String>> {
    if cfg.dry_run {
        warn!("Dry run: not reading the stored whitelist, pass --rule to include rules");
        return Ok(Vec::new());
    }

    let file: FirewallFile = load(cfg).await?;
    if !file.is_active() {
        anyhow::bail!("the firewall is not running, start it first");
    }
    Ok(file
        .vlan(vlan)
        .map(|entry| entry.whitelist.clone())
        .unwrap_or_default())
}

async fn show(cfg: &Config) -> anyhow::Result<()> {
    let file: FirewallFile = load(cfg).await?;

    print::header("firewall", cfg.quiet);
    if !file.is_active() || file.vlans.is_empty() {
        warn!("The firewall is not running");
        return Ok(());
    }

    let mut ids: Vec<(u16, &str)> = file
        .vlans
        .keys()
        .filter_map(|key| key.parse::<u16>().ok().map(|id| (id, key.as_str())))
        .collect();
    ids.sort_unstable();

    for (idx, (id, key)) in ids.iter().enumerate() {
        let Some(vlan) = file.vlans.get(*key) else {
            continue;
        };
        if idx > 0 {
            mprint!();
        }

        let title: String = format!("VLAN {id} {}", vlan.name.as_deref().unwrap_or(""));
        print::tree_head(idx, title.trim_end());

        let mut details: Vec<format::Detail> = vec![
            ("Enabled".to_string(), format::flag_to_colored(vlan.enabled)),
            ("Isolated".to_string(), format::flag_to_colored(vlan.isolated)),
            ("Restricted".to_string(), format::flag_to_colored(vlan.restricted)),
        ];
        let protected: bool = VlanId::new(*id).is_ok_and(VlanId::is_protected);
        if !protected {
            details.push(("Whitelist".to_string(), format::flag_to_colored(vlan.whitelist_enabled)));
            let rules: String = if vlan.whitelist.is_empty() {
                "-".to_string()
            } else {
                vlan.whitelist.join(" ")
            };
            details.push(("Rules".to_string(), rules.color(colors::ACCENT)));
        }
        print::as_tree_one_level(details);
    }
    Ok(())
}
