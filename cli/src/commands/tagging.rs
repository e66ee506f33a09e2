use crate::commands::TaggingCommand;
use crate::commands::dispatch::{self, submit};
use lanward_common::appliance::tagging::TaggingPort;
use lanward_common::config::Config;
use lanward_core::{actions, preflight};

pub async fn tagging(cmd: TaggingCommand, cfg: &Config) -> anyhow::Result<()> {
    match cmd {
        TaggingCommand::Add { name, untag, tag } => {
            let port: TaggingPort = TaggingPort::parse(&name, &untag, &tag)?;
            if !cfg.dry_run {
                preflight::tagging_port(&dispatch::backend(cfg)?, &port).await?;
            }
            submit(actions::tagging_add(&port), cfg).await
        }
        TaggingCommand::Remove { name } => submit(actions::tagging_remove(&name)?, cfg).await,
    }
}
