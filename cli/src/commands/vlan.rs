use colored::*;

use crate::commands::VlanCommand;
use crate::commands::dispatch::{self, submit, submit_with};
use crate::mprint;
use crate::terminal::{colors, print};
use lanward_common::appliance::vlan::VlanConfig;
use lanward_common::config::Config;
use lanward_core::actions;
use lanward_core::api::AdminResponse;
use lanward_core::snapshot::VlansFile;

pub async fn vlan(cmd: VlanCommand, cfg: &Config) -> anyhow::Result<()> {
    match cmd {
        VlanCommand::Add { id, pair, edit } => {
            let vlan = VlanConfig {
                id,
                name: pair.name.trim().to_string(),
                ip_interface: pair.interface.trim().to_string(),
                ip_network: pair.network.trim().to_string(),
            };
            submit(actions::vlan_add(&vlan, edit)?, cfg).await
        }
        VlanCommand::Remove { id } => submit(actions::vlan_remove(id)?, cfg).await,
        VlanCommand::Show => show(cfg).await,
    }
}

async fn show(cfg: &Config) -> anyhow::Result<()> {
    let cmd = actions::vlan_show();
    if cfg.dry_run {
        return dispatch::print_request(&cmd, cfg);
    }

    let backend = dispatch::backend(cfg)?;
    let resp: AdminResponse = submit_with(&backend, &cmd).await?;
    let mut file: VlansFile = VlansFile::from_show_message(&resp.text())?;
    file.vlans.sort_by_key(|vlan| vlan.id);

    print::header("configured vlans", cfg.quiet);
    if file.vlans.is_empty() {
        print::print_status("No VLANs configured");
        return Ok(());
    }

    for (idx, vlan) in file.vlans.iter().enumerate() {
        if idx > 0 {
            mprint!();
        }
        let title: String = format!("VLAN {} {}", vlan.id, vlan.name.as_deref().unwrap_or(""));
        print::tree_head(idx, title.trim_end());
        let field = |value: &Option<String>| match value.as_deref() {
            Some(v) if !v.is_empty() => v.color(colors::IPV4_ADDR),
            _ => "-".color(colors::SEPARATOR),
        };
        print::as_tree_one_level(vec![
            ("Interface".to_string(), field(&vlan.ip_interface)),
            ("Network".to_string(), field(&vlan.ip_network)),
        ]);
    }
    Ok(())
}
