use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use lanward_common::appliance::dmz::DmzDestination;
use lanward_common::appliance::tagging::TaggingPort;
use lanward_common::appliance::vlan::{VlanConfig, VlanId};
use lanward_common::appliance::wan::WanSettings;
use lanward_core::actions::{self, AdminCommand, Lifecycle};
use lanward_core::api::{AdminResponse, Module, ModuleStatus, StatusMap};
use lanward_core::backend::AdminBackend;
use lanward_core::dependencies::missing_dependency;
use lanward_core::poll::StatusPoller;
use lanward_core::preflight;
use lanward_core::snapshot::FirewallFile;
use lanward_core::watch::{WatchOptions, watch};
use serde_json::{Value, json};

/// Appliance stand-in: keeps module state, records every body it receives
/// and refuses to start a module whose prerequisites are down, as the real
/// server does.
#[derive(Default)]
struct FakeAppliance {
    running: Mutex<HashMap<Module, bool>>,
    received: Mutex<Vec<(Module, Value)>>,
    configs: Mutex<HashMap<Module, Value>>,
    status_script: Mutex<VecDeque<Value>>,
}

impl FakeAppliance {
    fn is_running(&self, module: Module) -> bool {
        self.running
            .lock()
            .unwrap()
            .get(&module)
            .copied()
            .unwrap_or(false)
    }

    fn publish(&self, module: Module, config: Value) {
        self.configs.lock().unwrap().insert(module, config);
    }

    fn received(&self) -> Vec<(Module, Value)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminBackend for FakeAppliance {
    async fn send(&self, cmd: &AdminCommand) -> anyhow::Result<AdminResponse> {
        let body: Value = serde_json::to_value(&cmd.request)?;
        self.received.lock().unwrap().push((cmd.module, body));

        let reply = |success: bool, message: String| AdminResponse {
            success,
            message: Some(message),
            detail: None,
        };

        match cmd.request.action.as_str() {
            "start" => {
                if let Some(dep) = missing_dependency(cmd.module, |m| self.is_running(m)) {
                    return Ok(reply(false, format!("{dep} is not running")));
                }
                self.running.lock().unwrap().insert(cmd.module, true);
                Ok(reply(true, format!("{} started", cmd.module)))
            }
            "stop" => {
                self.running.lock().unwrap().insert(cmd.module, false);
                Ok(reply(true, format!("{} stopped", cmd.module)))
            }
            action => Ok(reply(true, format!("{action} done"))),
        }
    }

    async fn statuses(&self) -> anyhow::Result<StatusMap> {
        if let Some(scripted) = self.status_script.lock().unwrap().pop_front() {
            return Ok(serde_json::from_value(scripted)?);
        }
        let map: HashMap<String, Value> = Module::ALL
            .into_iter()
            .map(|m| {
                let status = if self.is_running(m) { "ACTIVO" } else { "INACTIVO" };
                (m.name().to_string(), json!(status))
            })
            .collect();
        Ok(StatusMap(map))
    }

    async fn config(&self, module: Module) -> anyhow::Result<Value> {
        match self.configs.lock().unwrap().get(&module) {
            Some(config) => Ok(config.clone()),
            None => anyhow::bail!("404 Not Found: /config/{module}/{module}.json"),
        }
    }
}

#[tokio::test]
async fn modules_start_in_dependency_order() {
    let appliance = FakeAppliance::default();

    let early = appliance
        .send(&actions::lifecycle(Module::Tagging, Lifecycle::Start))
        .await
        .unwrap();
    assert!(!early.success, "tagging must not start before wan and vlans");

    for module in Module::ALL {
        let statuses = appliance.statuses().await.unwrap();
        assert_eq!(
            missing_dependency(module, |m| statuses.status(m).is_active()),
            None,
            "{module} prerequisites should already be up"
        );
        let resp = appliance
            .send(&actions::lifecycle(module, Lifecycle::Start))
            .await
            .unwrap();
        assert!(resp.success, "{module}: {}", resp.text());
    }

    let statuses = appliance.statuses().await.unwrap();
    assert!(Module::ALL.iter().all(|m| statuses.status(*m) == ModuleStatus::Active));
}

#[tokio::test]
async fn configuration_bodies_reach_the_backend() {
    let appliance = FakeAppliance::default();

    let wan = WanSettings::dhcp("eth0").unwrap();
    let vlan = VlanConfig {
        id: VlanId::new(10).unwrap(),
        name: "office".to_string(),
        ip_interface: "192.168.10.1/24".to_string(),
        ip_network: "192.168.10.0/24".to_string(),
    };
    let commands: Vec<AdminCommand> = vec![
        actions::wan_config(&wan),
        actions::vlan_add(&vlan, false).unwrap(),
        actions::firewall_add_rule(vlan.id, "8.8.8.8:53/UDP").unwrap(),
        actions::firewall_isolation(vlan.id, true).unwrap(),
    ];
    for cmd in &commands {
        assert!(appliance.send(cmd).await.unwrap().success);
    }

    let received = appliance.received();
    assert_eq!(received.len(), 4);
    assert_eq!(received[0].0, Module::Wan);
    assert_eq!(received[0].1["params"], json!({ "mode": "dhcp", "interface": "eth0" }));
    assert_eq!(received[1].1["params"]["ip_network"], "192.168.10.0/24");
    assert_eq!(
        received[2].1,
        json!({ "action": "add_rule", "params": { "vlan_id": 10, "rule": "8.8.8.8:53/udp" } })
    );
    assert_eq!(received[3].1["action"], "aislar");
}

/// Toggling a whitelist resends whatever the appliance has stored.
#[tokio::test]
async fn whitelist_toggle_uses_stored_rules() {
    let appliance = FakeAppliance::default();
    appliance.publish(
        Module::Firewall,
        json!({
            "status": 1,
            "vlans": { "10": { "whitelist_enabled": false, "whitelist": ["8.8.8.8", ":443/tcp"] } }
        }),
    );

    let vlan = VlanId::new(10).unwrap();
    let file = FirewallFile::from_value(appliance.config(Module::Firewall).await.unwrap()).unwrap();
    let stored = file.vlan(vlan).map(|v| v.whitelist.clone()).unwrap_or_default();

    let cmd = actions::firewall_whitelist(vlan, true, &stored).unwrap();
    appliance.send(&cmd).await.unwrap();

    let (_, body) = appliance.received().pop().unwrap();
    assert_eq!(
        body,
        json!({
            "action": "enable_whitelist",
            "params": { "vlan_id": 10, "whitelist": ["8.8.8.8", ":443/tcp"] }
        })
    );
}

#[tokio::test(start_paused = true)]
async fn watch_follows_a_module_coming_up() {
    let appliance = FakeAppliance::default();
    {
        let mut script = appliance.status_script.lock().unwrap();
        script.push_back(json!({ "wan": "INACTIVO" }));
        script.push_back(json!({ "wan": "INACTIVO" }));
        script.push_back(json!({ "wan": "ACTIVO" }));
    }

    let opts = WatchOptions {
        modules: vec![Module::Wan],
        max_polls: Some(3),
    };
    let mut seen: Vec<ModuleStatus> = Vec::new();
    let changes = watch(&appliance, &mut StatusPoller::default(), &opts, |row| {
        seen.push(row[0].1.clone());
    })
    .await;

    assert_eq!(changes, 2);
    assert_eq!(seen, vec![ModuleStatus::Inactive, ModuleStatus::Active]);
}

/// The DMZ page only accepts destinations while the firewall runs.
#[tokio::test]
async fn dmz_destination_needs_running_firewall() {
    let appliance = FakeAppliance::default();
    let dest = DmzDestination::parse("192.168.2.10", "443", "tcp").unwrap();

    let missing = preflight::dmz_destination(&appliance, &dest).await;
    assert!(missing.is_err(), "no firewall config must block the destination");

    appliance.publish(Module::Firewall, json!({ "status": 0, "vlans": {} }));
    let stopped = preflight::dmz_destination(&appliance, &dest)
        .await
        .expect_err("stopped firewall must block the destination");
    assert!(stopped.to_string().contains("firewall is not running"), "{stopped}");

    appliance.publish(Module::Firewall, json!({ "status": 1, "vlans": {} }));
    let running = preflight::dmz_destination(&appliance, &dest).await;
    assert!(running.is_ok(), "running firewall rejected: {:?}", running.err());
}

#[tokio::test]
async fn dmz_destination_checked_against_published_config() {
    let appliance = FakeAppliance::default();
    appliance.publish(Module::Firewall, json!({ "status": "1" }));
    appliance.publish(
        Module::Vlans,
        json!({ "vlans": [{ "id": 2, "name": "dmz", "ip_network": "192.168.2.0/25" }] }),
    );
    appliance.publish(
        Module::Dmz,
        json!({ "destinations": [{ "ip": "192.168.2.10", "port": 443, "protocol": "tcp" }] }),
    );

    let outside = DmzDestination::parse("192.168.2.200", "80", "tcp").unwrap();
    assert!(preflight::dmz_destination(&appliance, &outside).await.is_err());

    let clash = DmzDestination::parse("192.168.2.11", "443", "tcp").unwrap();
    assert!(preflight::dmz_destination(&appliance, &clash).await.is_err());

    let free = DmzDestination::parse("192.168.2.11", "443", "udp").unwrap();
    assert!(preflight::dmz_destination(&appliance, &free).await.is_ok());
}

#[tokio::test]
async fn tagging_port_needs_known_vlans() {
    let appliance = FakeAppliance::default();
    let port = TaggingPort::parse("eth1", "", "10,20").unwrap();

    assert!(
        preflight::tagging_port(&appliance, &port).await.is_ok(),
        "an unreadable VLAN table skips the check"
    );

    appliance.publish(Module::Vlans, json!({ "vlans": [{ "id": 1 }, { "id": 10 }] }));
    assert!(preflight::tagging_port(&appliance, &port).await.is_err());

    appliance.publish(Module::Vlans, json!({ "vlans": [{ "id": 10 }, { "id": 20 }] }));
    assert!(preflight::tagging_port(&appliance, &port).await.is_ok());
}
