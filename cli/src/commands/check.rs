use colored::*;

use crate::commands::{CheckCommand, DmzArgs, PairArgs};
use crate::mprint;
use crate::terminal::{colors, format, print};
use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::appliance::vlan::VlanList;
use lanward_common::config::Config;
use lanward_common::network::cidr::{Ipv4Cidr, parse_cidr};
use lanward_common::network::pair::{InterfacePair, validate_interface_pair};
use lanward_common::network::rule::{WhitelistRule, validate_rule};
use lanward_common::success;

pub fn check(cmd: CheckCommand, cfg: &Config) -> anyhow::Result<()> {
    match cmd {
        CheckCommand::Cidr { cidr } => check_cidr(&cidr, cfg),
        CheckCommand::Pair(pair) => check_pair(&pair, cfg),
        CheckCommand::Rule { rules } => check_rules(&rules, cfg),
        CheckCommand::Vlans { list } => check_vlans(&list, cfg),
        CheckCommand::Dmz {
            destination,
            network,
        } => check_dmz(&destination, network.as_deref(), cfg),
    }
}

fn check_cidr(raw: &str, cfg: &Config) -> anyhow::Result<()> {
    let cidr: Ipv4Cidr = parse_cidr(raw)?;

    print::header("address block", cfg.quiet);
    print::tree_head(0, &cidr.to_string());
    print::as_tree_one_level(format::cidr_to_details(&cidr));
    Ok(())
}

fn check_pair(args: &PairArgs, cfg: &Config) -> anyhow::Result<()> {
    let pair: InterfacePair = validate_interface_pair(
        args.name.trim(),
        args.interface.trim(),
        args.network.trim(),
    )?;

    print::header("interface pair", cfg.quiet);
    print::aligned_line("Name", args.name.trim());
    print::aligned_line("Interface", format::cidr_to_colored(&pair.interface));
    print::aligned_line("Network", format::cidr_to_colored(&pair.network));
    success!("{} is a valid interface for {}", pair.interface, pair.network);
    Ok(())
}

/// Checks every rule before failing so all problems show at once.
fn check_rules(rules: &[String], cfg: &Config) -> anyhow::Result<()> {
    print::header("whitelist rules", cfg.quiet);

    let mut failed: usize = 0;
    for (idx, raw) in rules.iter().enumerate() {
        if idx > 0 {
            mprint!();
        }
        match validate_rule(raw) {
            Ok(rule) => print_rule(idx, &rule),
            Err(e) => {
                failed += 1;
                print::tree_head(idx, raw);
                print::as_tree_one_level(vec![(
                    "Error".to_string(),
                    format!("{e} ({:?})", e.kind()).red(),
                )]);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} rules are invalid", rules.len());
    }
    success!("{} rules are valid", rules.len());
    Ok(())
}

fn print_rule(idx: usize, rule: &WhitelistRule) {
    print::tree_head(idx, &rule.to_string());
    print::as_tree_one_level(format::rule_to_details(rule));
}

fn check_vlans(raw: &str, cfg: &Config) -> anyhow::Result<()> {
    let list: VlanList = raw.parse()?;
    let ids: Vec<String> = list.ids().iter().map(ToString::to_string).collect();

    print::header("vlan list", cfg.quiet);
    print::aligned_line("Canonical", list.to_string().color(colors::ACCENT));
    print::aligned_line("Count", ids.len().to_string());
    print::aligned_line("Ids", ids.join(" "));
    Ok(())
}

fn check_dmz(args: &DmzArgs, network: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    let dest: DmzDestination = DmzDestination::parse(&args.ip, &args.port, &args.protocol)?;
    if let Some(network) = network {
        dest.check_network(&parse_cidr(network)?)?;
    }

    print::header("dmz destination", cfg.quiet);
    print::aligned_line("IP", dest.ip.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Port", dest.port.to_string().color(colors::PORT));
    print::aligned_line("Protocol", dest.protocol.to_string());
    Ok(())
}
