//! # Status Polling
//!
//! The dashboard refreshes module status every two seconds and backs off
//! while nothing changes. [`StatusPoller`] holds that state explicitly so a
//! watcher can own one per module set.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub base: Duration,
    pub on_error: Duration,
    /// `(unchanged polls above, delay)`, checked from the last entry down.
    pub backoff: Vec<(u32, Duration)>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(2),
            on_error: Duration::from_secs(5),
            backoff: vec![
                (3, Duration::from_secs(5)),
                (10, Duration::from_secs(10)),
                (20, Duration::from_secs(30)),
            ],
        }
    }
}

impl PollPolicy {
    pub fn delay_for(&self, unchanged: u32) -> Duration {
        self.backoff
            .iter()
            .rev()
            .find(|(threshold, _)| unchanged > *threshold)
            .map(|(_, delay)| *delay)
            .unwrap_or(self.base)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub changed: bool,
    pub delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct StatusPoller {
    policy: PollPolicy,
    last: Option<String>,
    unchanged: u32,
}

impl StatusPoller {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            last: None,
            unchanged: 0,
        }
    }

    /// Records a fresh snapshot. The first snapshot always counts as a change.
    pub fn observe(&mut self, snapshot: &str) -> PollOutcome {
        let changed: bool = self.last.as_deref() != Some(snapshot);
        if changed {
            self.last = Some(snapshot.to_string());
            self.unchanged = 0;
        } else {
            self.unchanged = self.unchanged.saturating_add(1);
        }

        PollOutcome {
            changed,
            delay: self.policy.delay_for(self.unchanged),
        }
    }

    /// A failed poll keeps the unchanged count as it is.
    pub fn observe_error(&self) -> Duration {
        self.policy.on_error
    }

    pub fn unchanged(&self) -> u32 {
        self.unchanged
    }
}
