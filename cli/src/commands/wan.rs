use crate::commands::WanArgs;
use crate::commands::dispatch::submit;
use lanward_common::appliance::wan::{WanError, WanSettings};
use lanward_common::config::Config;
use lanward_common::info;
use lanward_core::actions;

fn settings(args: &WanArgs) -> Result<WanSettings, WanError> {
    WanSettings::from_form(
        &args.mode,
        &args.interface,
        &args.ip,
        &args.mask,
        &args.gateway,
        &args.dns,
    )
}

pub async fn wan(args: WanArgs, cfg: &Config) -> anyhow::Result<()> {
    let settings: WanSettings = settings(&args)?;
    info!("WAN on {} in {} mode", settings.interface(), settings.mode());
    submit(actions::wan_config(&settings), cfg).await
}
