use std::time::Instant;

use colored::*;

use crate::mprint;
use crate::terminal::{colors, format, print};
use lanward_common::config::Config;
use lanward_common::info;
use lanward_core::api::Module;
use lanward_core::poll::StatusPoller;
use lanward_core::watch::{StatusRow, WatchOptions, watch as watch_statuses};

pub async fn watch(modules: Vec<Module>, count: Option<usize>, cfg: &Config) -> anyhow::Result<()> {
    let backend = crate::commands::dispatch::backend(cfg)?;
    let opts = WatchOptions {
        modules: if modules.is_empty() {
            Module::ALL.to_vec()
        } else {
            modules
        },
        max_polls: count,
    };

    print::header("watching module status", cfg.quiet);
    print::fit_keys(opts.modules.iter().map(|m| m.name()));
    info!("Polling {} (Ctrl-C to stop)", cfg.url("/admin/status"));

    let start: Instant = Instant::now();
    let mut poller = StatusPoller::default();
    let changes: usize = watch_statuses(&backend, &mut poller, &opts, |row| {
        print_row(row, start);
    })
    .await;

    info!("{changes} status changes seen");
    Ok(())
}

fn print_row(row: &StatusRow, start: Instant) {
    mprint!();
    let stamp: ColoredString = format!("+{}s", start.elapsed().as_secs()).color(colors::SEPARATOR);
    print::print_status(format!("{stamp}"));
    for (module, status) in row {
        print::aligned_line(module.name(), format::status_to_colored(status));
    }
}
