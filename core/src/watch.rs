//! # Status Watch
//!
//! Polls `/admin/status` until stopped, reporting only when one of the
//! watched modules changes state. Delays come from a [`StatusPoller`].

use std::time::Duration;

use lanward_common::warn;
use tokio::time::sleep;
use tracing::debug;

use crate::api::{Module, ModuleStatus, StatusMap};
use crate::backend::AdminBackend;
use crate::poll::{PollOutcome, StatusPoller};

/// Statuses of the watched modules, in the order they were requested.
pub type StatusRow = Vec<(Module, ModuleStatus)>;

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub modules: Vec<Module>,
    /// Stop after this many polls, failed ones included. `None` runs forever.
    /// The first poll always happens, so `Some(0)` behaves like `Some(1)`.
    pub max_polls: Option<usize>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            modules: Module::ALL.to_vec(),
            max_polls: None,
        }
    }
}

fn row(map: &StatusMap, modules: &[Module]) -> (String, StatusRow) {
    let mut key: String = String::new();
    let mut row: StatusRow = Vec::with_capacity(modules.len());
    for module in modules {
        let raw: String = map.raw(*module);
        key.push_str(&format!("{module}={raw};"));
        row.push((*module, ModuleStatus::from_wire(&raw)));
    }
    (key, row)
}

/// Runs the watch loop and returns how many changes were reported.
pub async fn watch<B, F>(
    backend: &B,
    poller: &mut StatusPoller,
    opts: &WatchOptions,
    mut on_change: F,
) -> usize
where
    B: AdminBackend + ?Sized,
    F: FnMut(&StatusRow),
{
    let mut polls: usize = 0;
    let mut changes: usize = 0;

    loop {
        let delay: Duration = match backend.statuses().await {
            Ok(map) => {
                let (key, row) = row(&map, &opts.modules);
                let PollOutcome { changed, delay } = poller.observe(&key);
                if changed {
                    changes += 1;
                    on_change(&row);
                }
                delay
            }
            Err(e) => {
                warn!("Status poll failed: {e:#}");
                poller.observe_error()
            }
        };

        polls += 1;
        if opts.max_polls.is_some_and(|max| polls >= max) {
            return changes;
        }

        debug!("Next status poll in {}s", delay.as_secs());
        sleep(delay).await;
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
