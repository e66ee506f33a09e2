pub mod check;
pub mod dispatch;
pub mod dmz;
pub mod firewall;
pub mod module;
pub mod tagging;
pub mod vlan;
pub mod wan;
pub mod watch;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use lanward_common::appliance::vlan::VlanId;
use lanward_common::config::DEFAULT_ENDPOINT;
use lanward_core::api::Module;

#[derive(Parser)]
#[command(name = "lanward")]
#[command(version, about = "Validate and apply router dashboard settings.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the appliance admin API
    #[arg(long, global = true, env = "LANWARD_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Session cookie to send, as name=value
    #[arg(long, global = true, env = "LANWARD_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Validate and print the request instead of sending it
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,

    /// Less output; repeat for errors only
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// More output; repeat for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate input offline
    #[command(alias = "c", subcommand)]
    Check(CheckCommand),
    /// Add, edit, remove or list VLANs
    #[command(subcommand)]
    Vlan(VlanCommand),
    /// Per-VLAN isolation, restriction and whitelists
    #[command(alias = "fw", subcommand)]
    Firewall(FirewallCommand),
    /// DMZ port forwarding
    #[command(subcommand)]
    Dmz(DmzCommand),
    /// 802.1Q port tagging
    #[command(alias = "tag", subcommand)]
    Tagging(TaggingCommand),
    /// Configure the WAN uplink by DHCP or by hand
    Wan(WanArgs),
    /// Start, stop, restart or query one module
    #[command(alias = "m")]
    Module {
        module: Module,
        #[arg(value_enum)]
        action: LifecycleArg,
        /// Start even if a required module is not running
        #[arg(long)]
        force: bool,
    },
    /// Show the status of every module
    #[command(alias = "s")]
    Status,
    /// Poll module status and report changes
    #[command(alias = "w")]
    Watch {
        /// Modules to watch; all of them when omitted
        modules: Vec<Module>,
        /// Stop after this many polls
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum CheckCommand {
    /// Classify an address/prefix block
    Cidr { cidr: String },
    /// Check a VLAN interface address against its network
    Pair(PairArgs),
    /// Check one or more firewall whitelist rules
    Rule {
        #[arg(required = true)]
        rules: Vec<String>,
    },
    /// Expand a VLAN list such as 1,2,3-10
    Vlans { list: String },
    /// Check a DMZ destination
    Dmz {
        #[command(flatten)]
        destination: DmzArgs,
        /// DMZ network the destination must fall in
        #[arg(long)]
        network: Option<String>,
    },
}

#[derive(Args)]
pub struct PairArgs {
    pub name: String,
    /// Interface address, e.g. 192.168.10.1/24
    pub interface: String,
    /// Network address, e.g. 192.168.10.0/24
    pub network: String,
}

#[derive(Subcommand)]
pub enum VlanCommand {
    /// Create a VLAN, or overwrite one with --edit
    #[command(alias = "a")]
    Add {
        id: VlanId,
        #[command(flatten)]
        pair: PairArgs,
        /// Overwrite an existing VLAN; protected VLANs may be edited
        #[arg(long)]
        edit: bool,
    },
    /// Remove a VLAN
    #[command(alias = "rm")]
    Remove { id: VlanId },
    /// List configured VLANs
    #[command(alias = "ls")]
    Show,
}

#[derive(Subcommand)]
pub enum FirewallCommand {
    /// Add a whitelist rule to a VLAN
    AddRule { vlan: VlanId, rule: String },
    /// Remove a whitelist rule exactly as stored
    #[command(alias = "rm-rule")]
    RemoveRule { vlan: VlanId, rule: String },
    /// Turn a VLAN whitelist on or off
    Whitelist {
        vlan: VlanId,
        #[arg(value_enum)]
        state: Toggle,
        /// Rules to send; the stored whitelist is used when omitted
        #[arg(long = "rule")]
        rules: Vec<String>,
    },
    /// Isolate a VLAN from the others
    Isolate { vlan: VlanId },
    /// Lift VLAN isolation
    Unisolate { vlan: VlanId },
    /// Restrict a VLAN's access to the appliance
    Restrict { vlan: VlanId },
    /// Lift VLAN restriction
    Unrestrict { vlan: VlanId },
    /// Restore the default firewall policy
    Reset,
    /// Show per-VLAN firewall state
    #[command(alias = "ls")]
    Show,
}

#[derive(Args)]
pub struct DmzArgs {
    pub ip: String,
    pub port: String,
    pub protocol: String,
}

#[derive(Subcommand)]
pub enum DmzCommand {
    /// Forward a port to a DMZ host
    Add {
        #[command(flatten)]
        destination: DmzArgs,
        /// Skip the firewall, network and port-conflict checks against the appliance
        #[arg(long)]
        no_remote_checks: bool,
    },
}

#[derive(Subcommand)]
pub enum TaggingCommand {
    /// Configure a port as access (--untag) or trunk (--tag)
    Add {
        name: String,
        /// Untagged VLAN id
        #[arg(long, default_value = "")]
        untag: String,
        /// Tagged VLAN list, e.g. 10,20-30
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// Drop a port's tagging
    #[command(alias = "rm")]
    Remove { name: String },
}

/// Same fields as the WAN form; manual-only fields are ignored for DHCP.
#[derive(Args)]
pub struct WanArgs {
    /// dhcp or manual
    pub mode: String,
    pub interface: String,
    #[arg(long, default_value = "")]
    pub ip: String,
    /// Prefix length
    #[arg(long, default_value = "")]
    pub mask: String,
    #[arg(long, default_value = "")]
    pub gateway: String,
    /// Comma-separated DNS servers
    #[arg(long, default_value = "")]
    pub dns: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LifecycleArg {
    Start,
    Stop,
    Restart,
    Status,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = CommandLine::try_parse_from([
            "lanward", "--dry-run", "fw", "whitelist", "10", "on", "--rule", ":443",
        ])
        .unwrap();
        assert!(cli.dry_run);
        match cli.command {
            Commands::Firewall(FirewallCommand::Whitelist { vlan, state, rules }) => {
                assert_eq!(vlan.get(), 10);
                assert!(state == Toggle::On);
                assert_eq!(rules, vec![":443"]);
            }
            _ => panic!("expected firewall whitelist"),
        }

        let cli = CommandLine::try_parse_from(["lanward", "wan", "dhcp", "eth0"]).unwrap();
        match cli.command {
            Commands::Wan(args) => {
                assert_eq!((args.mode.as_str(), args.interface.as_str()), ("dhcp", "eth0"));
                assert!(args.ip.is_empty());
            }
            _ => panic!("expected wan"),
        }

        assert!(CommandLine::try_parse_from(["lanward", "vlan", "rm", "5000"]).is_err());
        assert!(CommandLine::try_parse_from(["lanward", "watch", "--count", "0"]).is_err());
        assert!(CommandLine::try_parse_from(["lanward", "watch", "wan", "--count", "1"]).is_ok());
        assert!(CommandLine::try_parse_from(["lanward", "module", "qos", "start"]).is_err());
    }
}
