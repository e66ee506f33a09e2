use crate::commands::DmzCommand;
use crate::commands::dispatch::{self, submit};
use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::config::Config;
use lanward_core::{actions, preflight};

pub async fn dmz(cmd: DmzCommand, cfg: &Config) -> anyhow::Result<()> {
    match cmd {
        DmzCommand::Add {
            destination,
            no_remote_checks,
        } => {
            let dest: DmzDestination =
                DmzDestination::parse(&destination.ip, &destination.port, &destination.protocol)?;
            if !no_remote_checks && !cfg.dry_run {
                preflight::dmz_destination(&dispatch::backend(cfg)?, &dest).await?;
            }
            submit(actions::dmz_add(&dest), cfg).await
        }
    }
}
