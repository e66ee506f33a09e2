//! Checks against the appliance's own config files, run before a request
//! is sent. The config files may not exist yet on a fresh appliance; a
//! missing VLAN or DMZ file skips that check instead of failing.

use anyhow::{Context, bail};
use tracing::debug;

use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::appliance::tagging::TaggingPort;
use lanward_common::warn;

use crate::api::Module;
use crate::backend::AdminBackend;
use crate::snapshot::{DmzFile, FirewallFile, VlansFile};

/// DMZ forwards are firewall rules, so the firewall has to be running.
/// An unreadable firewall config counts as not running.
pub async fn dmz_destination<B>(backend: &B, dest: &DmzDestination) -> anyhow::Result<()>
where
    B: AdminBackend + ?Sized,
{
    let firewall: FirewallFile = match backend.config(Module::Firewall).await {
        Ok(raw) => FirewallFile::from_value(raw).context("decoding firewall config")?,
        Err(e) => bail!("cannot confirm the firewall is running, start it first: {e:#}"),
    };
    if !firewall.is_active() {
        bail!("the firewall is not running, start it before adding DMZ destinations");
    }

    match backend.config(Module::Vlans).await {
        Ok(raw) => {
            let vlans: VlansFile = VlansFile::from_value(raw).context("decoding VLAN config")?;
            match vlans.dmz_network() {
                Some(network) => dest.check_network(&network)?,
                None => warn!("DMZ VLAN has no network configured, skipping network check"),
            }
        }
        Err(e) => debug!("VLAN config unavailable: {e:#}"),
    }

    match backend.config(Module::Dmz).await {
        Ok(raw) => {
            let file: DmzFile = DmzFile::from_value(raw).context("decoding DMZ config")?;
            dest.check_conflicts(&file.destinations())?;
        }
        Err(e) => debug!("DMZ config unavailable: {e:#}"),
    }
    Ok(())
}

/// Every VLAN the port references must already exist.
pub async fn tagging_port<B>(backend: &B, port: &TaggingPort) -> anyhow::Result<()>
where
    B: AdminBackend + ?Sized,
{
    match backend.config(Module::Vlans).await.and_then(VlansFile::from_value) {
        Ok(vlans) => port.check_known(&vlans.ids())?,
        Err(e) => warn!("Could not read VLAN table, not checking VLAN ids: {e:#}"),
    }
    Ok(())
}
