use colored::*;

use crate::commands::LifecycleArg;
use crate::commands::dispatch::{self, submit};
use crate::terminal::{colors, format, print};
use lanward_common::config::Config;
use lanward_common::warn;
use lanward_core::actions::{self, Lifecycle};
use lanward_core::api::{Module, StatusMap};
use lanward_core::backend::AdminBackend;
use lanward_core::dependencies::{dependents, missing_dependency};

impl From<LifecycleArg> for Lifecycle {
    fn from(arg: LifecycleArg) -> Self {
        match arg {
            LifecycleArg::Start => Lifecycle::Start,
            LifecycleArg::Stop => Lifecycle::Stop,
            LifecycleArg::Restart => Lifecycle::Restart,
            LifecycleArg::Status => Lifecycle::Status,
        }
    }
}

pub async fn module(
    module: Module,
    action: LifecycleArg,
    force: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let action: Lifecycle = action.into();

    if !cfg.dry_run && matches!(action, Lifecycle::Start | Lifecycle::Stop) {
        let statuses: StatusMap = dispatch::backend(cfg)?.statuses().await?;
        let is_active = |m: Module| statuses.status(m).is_active();

        if action == Lifecycle::Start {
            if let Some(dep) = missing_dependency(module, is_active) {
                if !force {
                    anyhow::bail!("{module} needs {dep} running first (use --force to start anyway)");
                }
                warn!("Starting {module} although {dep} is not running");
            }
        } else {
            for dependent in dependents(module).into_iter().filter(|m| is_active(*m)) {
                warn!("{dependent} depends on {module} and is still running");
            }
        }
    }

    submit(actions::lifecycle(module, action), cfg).await
}

pub async fn status(cfg: &Config) -> anyhow::Result<()> {
    let statuses: StatusMap = dispatch::backend(cfg)?.statuses().await?;

    print::header("module status", cfg.quiet);
    print::fit_keys(Module::ALL.iter().map(|m| m.name()));
    for module in Module::ALL {
        print::aligned_line(module.name(), format::status_to_colored(&statuses.status(module)));
    }

    let inactive: usize = Module::ALL
        .iter()
        .filter(|m| !statuses.status(**m).is_active())
        .count();
    if cfg.quiet == 0 {
        let running: ColoredString = format!("{} running", Module::ALL.len() - inactive).bold().green();
        let stopped: ColoredString = format!("{inactive} stopped").bold().color(colors::ACCENT);
        print::fat_separator();
        print::centerln(&format!("Modules: {running}, {stopped}"));
    }
    Ok(())
}
