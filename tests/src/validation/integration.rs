use lanward_common::appliance::dmz::{DmzDestination, DmzError};
use lanward_common::appliance::tagging::{PortMode, TaggingPort};
use lanward_common::appliance::vlan::{VlanConfig, VlanError, VlanId};
use lanward_common::network::cidr::{
    address_in_network, is_host_address, is_network_address, parse_cidr, same_mask,
};
use lanward_common::network::pair::{PairCheck, validate_interface_pair};
use lanward_common::network::range::host_range;
use lanward_common::network::rule::{RuleErrorKind, validate_rule};
use std::net::Ipv4Addr;

/// Walks the same checks the VLAN form runs, in order, on a realistic
/// office network and on each kind of mistake a user makes.
#[test]
fn vlan_form_reports_first_failing_check() {
    let ok = validate_interface_pair("office", "10.20.0.1/16", "10.20.0.0/16");
    assert!(ok.is_ok(), "valid pair rejected: {:?}", ok.err());

    let cases: [(&str, &str, &str, PairCheck); 6] = [
        ("", "10.20.0.1/16", "10.20.0.0/16", PairCheck::Name),
        ("office", "10.20.0.1", "10.20.0.0/16", PairCheck::InterfaceFormat),
        ("office", "10.20.0.0/16", "10.20.0.0/16", PairCheck::InterfaceHost),
        ("office", "10.20.0.1/16", "10.20.0.1/16", PairCheck::NetworkAddress),
        ("office", "10.20.0.1/24", "10.20.0.0/16", PairCheck::SameMask),
        ("office", "10.21.0.1/16", "10.20.0.0/16", PairCheck::Containment),
    ];

    for (name, iface, net, expected) in cases {
        let err = validate_interface_pair(name, iface, net)
            .expect_err(&format!("{name:?} {iface} {net} should fail"));
        assert_eq!(err.check(), expected, "wrong check for {iface} {net}: {err}");
    }
}

/// A protected VLAN can be edited but never created, and the edit still
/// goes through the interface pair checks.
#[test]
fn protected_vlan_edit_flow() {
    let dmz = VlanConfig {
        id: VlanId::new(2).unwrap(),
        name: "dmz".to_string(),
        ip_interface: "192.168.2.1/25".to_string(),
        ip_network: "192.168.2.0/25".to_string(),
    };

    assert_eq!(dmz.validate_new(), Err(VlanError::Protected(dmz.id)));
    let pair = dmz.validate_edit().expect("editing VLAN 2 must be allowed");

    let hosts = host_range(&pair.network).expect("/25 has hosts");
    assert_eq!(hosts.start_addr, Ipv4Addr::new(192, 168, 2, 1));
    assert_eq!(hosts.end_addr, Ipv4Addr::new(192, 168, 2, 126));
}

#[test]
fn network_helpers_agree_with_parser() {
    for raw in ["192.168.1.0/24", "10.0.0.0/8", "172.16.4.0/22", "8.8.8.8/32"] {
        let cidr = parse_cidr(raw).unwrap();
        assert!(is_network_address(raw), "{raw} should be a network");
        assert!(!is_host_address(raw) || cidr.prefix() == 32);
        assert!(address_in_network(&cidr.address().to_string(), raw));
        assert!(same_mask(raw, &format!("{}/{}", cidr.network(), cidr.prefix())));
    }
}

/// Rules exactly as users type them into the whitelist box.
#[test]
fn whitelist_rules_from_the_form() {
    let accepted = [
        ("192.168.1.50", "192.168.1.50"),
        ("  8.8.8.8/UDP ", "8.8.8.8/udp"),
        (":443", ":443"),
        (":53/udp", ":53/udp"),
        ("1.1.1.1:853/tcp", "1.1.1.1:853/tcp"),
        ("/tcp", "/tcp"),
    ];
    for (raw, canonical) in accepted {
        let rule = validate_rule(raw).unwrap_or_else(|e| panic!("{raw:?} rejected: {e}"));
        assert_eq!(rule.to_string(), canonical);
        assert_eq!(validate_rule(canonical).unwrap(), rule, "{canonical} does not round-trip");
    }

    let rejected = [
        ("", RuleErrorKind::Empty),
        ("1.1.1.1/icmp", RuleErrorKind::InvalidProtocol),
        (":http", RuleErrorKind::InvalidPort),
        (":70000", RuleErrorKind::PortOutOfRange),
        ("1.1.1.256", RuleErrorKind::InvalidIp),
        ("fe80::1", RuleErrorKind::Ipv6Unsupported),
        ("1.1.1.1/tcp/udp", RuleErrorKind::Malformed),
    ];
    for (raw, kind) in rejected {
        let err = validate_rule(raw).expect_err(raw);
        assert_eq!(err.kind(), kind, "{raw:?} gave {err}");
    }
}

#[test]
fn dmz_destination_against_existing_forwards() {
    let network = parse_cidr("192.168.2.1/25").unwrap();
    let existing = vec![DmzDestination::parse("192.168.2.10", "443", "tcp").unwrap()];

    let web = DmzDestination::parse("192.168.2.10", "443", "TCP").unwrap();
    assert!(web.check_network(&network).is_ok());
    assert!(web.check_conflicts(&existing).is_ok(), "re-adding the same forward is fine");

    let other = DmzDestination::parse("192.168.2.11", "443", "tcp").unwrap();
    assert!(matches!(
        other.check_conflicts(&existing),
        Err(DmzError::PortInUse { port: 443, .. })
    ));

    let outside = DmzDestination::parse("192.168.2.200", "80", "tcp").unwrap();
    assert!(matches!(
        outside.check_network(&network),
        Err(DmzError::OutsideDmz { .. })
    ));
}

#[test]
fn trunk_port_only_uses_known_vlans() {
    let configured: Vec<VlanId> = [1, 2, 10, 11, 12]
        .into_iter()
        .map(|id| VlanId::new(id).unwrap())
        .collect();

    let trunk = TaggingPort::parse("eth2", "", "10-12,2").unwrap();
    match &trunk.mode {
        PortMode::Trunk(list) => assert_eq!(list.to_string(), "2,10-12"),
        other => panic!("expected trunk, got {other:?}"),
    }
    assert!(trunk.check_known(&configured).is_ok());

    let access = TaggingPort::parse("eth3", "20", "").unwrap();
    assert!(access.check_known(&configured).is_err());
}
