//! # Lanward Core
//!
//! Everything between the validators in `lanward-common` and the admin API
//! of the appliance.
//!
//! * **[`api`]**: wire model of `/admin/*` requests and responses.
//! * **[`actions`]**: typed per-module commands, built only from validated input.
//! * **[`dependencies`]**: which modules must be running before another can start.
//! * **[`poll`]**: adaptive status polling policy.
//! * **[`preflight`]**: checks against the appliance config before sending.
//! * **[`snapshot`]**: typed views of the config files the appliance publishes.
//! * **[`backend`]**: the transport trait and its HTTP implementation.
//! * **[`watch`]**: the status watch loop.

pub mod actions;
pub mod api;
pub mod backend;
pub mod dependencies;
pub mod poll;
pub mod preflight;
pub mod snapshot;
pub mod watch;
