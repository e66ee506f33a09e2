use colored::*;

use crate::terminal::colors;
use lanward_common::network::cidr::{Ipv4Cidr, NetworkRole};
use lanward_common::network::range::{describe_hosts, host_range};
use lanward_common::network::rule::WhitelistRule;
use lanward_core::api::ModuleStatus;

pub type Detail = (String, ColoredString);

pub fn cidr_to_colored(cidr: &Ipv4Cidr) -> ColoredString {
    format!(
        "{}{}",
        cidr.address().to_string().color(colors::IPV4_ADDR),
        format!("/{}", cidr.prefix()).color(colors::IPV4_PREFIX)
    )
    .normal()
}

pub fn role_to_str(role: NetworkRole) -> &'static str {
    match role {
        NetworkRole::Network => "network address",
        NetworkRole::Host => "host address",
        NetworkRole::Broadcast => "broadcast address",
    }
}

pub fn cidr_to_details(cidr: &Ipv4Cidr) -> Vec<Detail> {
    vec![
        ("Role".to_string(), role_to_str(cidr.role()).normal()),
        ("Mask".to_string(), std::net::Ipv4Addr::from(cidr.mask()).to_string().color(colors::IPV4_PREFIX)),
        ("Network".to_string(), cidr.network().to_string().color(colors::IPV4_ADDR)),
        ("Broadcast".to_string(), cidr.broadcast().to_string().color(colors::IPV4_ADDR)),
        ("Hosts".to_string(), describe_hosts(cidr).normal()),
        (
            "Usable".to_string(),
            host_range(cidr)
                .map_or(0, |range| range.size())
                .to_string()
                .color(colors::ACCENT),
        ),
    ]
}

pub fn rule_to_details(rule: &WhitelistRule) -> Vec<Detail> {
    let any = || "any".color(colors::SEPARATOR);
    vec![
        (
            "IP".to_string(),
            rule.ip.map_or_else(any, |ip| ip.to_string().color(colors::IPV4_ADDR)),
        ),
        (
            "Port".to_string(),
            rule.port.map_or_else(any, |port| port.to_string().color(colors::PORT)),
        ),
        (
            "Proto".to_string(),
            rule.proto.map_or_else(any, |proto| proto.to_string().color(colors::ACCENT)),
        ),
    ]
}

pub fn status_to_colored(status: &ModuleStatus) -> ColoredString {
    match status {
        ModuleStatus::Active => status.to_string().color(colors::ACTIVE).bold(),
        ModuleStatus::Inactive => status.to_string().color(colors::INACTIVE),
        ModuleStatus::Unknown(_) => status.to_string().color(colors::UNKNOWN),
    }
}

pub fn flag_to_colored(on: bool) -> ColoredString {
    if on {
        "yes".color(colors::ACTIVE)
    } else {
        "no".color(colors::SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Ipv4Cidr {
        s.parse().unwrap()
    }

    fn value<'a>(details: &'a [Detail], key: &str) -> &'a str {
        details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| &**v)
            .unwrap()
    }

    #[test]
    fn test_cidr_details() {
        let details = cidr_to_details(&cidr("192.168.2.1/25"));
        assert_eq!(value(&details, "Role"), "host address");
        assert_eq!(value(&details, "Mask"), "255.255.255.128");
        assert_eq!(value(&details, "Broadcast"), "192.168.2.127");
        assert_eq!(value(&details, "Hosts"), "192.168.2.1 - 192.168.2.126");
        assert_eq!(value(&details, "Usable"), "126");

        let details = cidr_to_details(&cidr("10.0.0.6/31"));
        assert_eq!(value(&details, "Usable"), "0");
    }
}
