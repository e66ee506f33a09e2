//! # Lanward Common
//!
//! Pure input validation shared by the admin client and the command line.
//!
//! * **[`network`]**: IPv4 parsing, CIDR blocks, interface/network pairs and
//!   the firewall whitelist rule grammar.
//! * **[`appliance`]**: per-module settings (VLANs, tagging, DMZ, WAN).
//! * **[`config`]**: runtime options shared by every command.
//!
//! Nothing in here performs I/O or logs; every failure is a typed error.

pub mod appliance;
pub mod config;
pub mod macros;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;
