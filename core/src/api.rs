//! Wire model of the admin API.
//!
//! Every module is driven through `POST /admin/<module>` with a body of
//! `{"action": ..., "params": {...}}` and answers `{"success", "message"}`.
//! Errors raised before the module runs come back as non-2xx responses
//! carrying `{"detail": ...}` instead.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Appliance modules, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Module {
    Wan,
    Vlans,
    Tagging,
    Firewall,
    Ebtables,
    Dmz,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Wan,
        Module::Vlans,
        Module::Tagging,
        Module::Firewall,
        Module::Ebtables,
        Module::Dmz,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Module::Wan => "wan",
            Module::Vlans => "vlans",
            Module::Tagging => "tagging",
            Module::Firewall => "firewall",
            Module::Ebtables => "ebtables",
            Module::Dmz => "dmz",
        }
    }

    pub fn endpoint(self) -> String {
        format!("/admin/{}", self.name())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Module::ALL
            .into_iter()
            .find(|module| module.name() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = Module::ALL.iter().map(|m| m.name()).collect();
                format!("unknown module '{s}', expected one of: {}", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRequest {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl AdminRequest {
    /// A bare `{"action": ...}` body, as used by start/stop/restart/status.
    pub fn bare(action: &str) -> Self {
        Self {
            action: action.to_string(),
            params: None,
        }
    }

    pub fn with_params(action: &str, params: Value) -> Self {
        Self {
            action: action.to_string(),
            params: Some(params),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Present on framework-level errors; a string or a list of objects.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl AdminResponse {
    /// The most useful text the server gave back.
    pub fn text(&self) -> String {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return message.to_string();
        }
        match &self.detail {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => String::from("unknown error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    Active,
    Inactive,
    Unknown(String),
}

impl ModuleStatus {
    /// Maps the status strings of `/admin/status` (`ACTIVO`, `INACTIVO`).
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "ACTIVO" => ModuleStatus::Active,
            "INACTIVO" => ModuleStatus::Inactive,
            other => ModuleStatus::Unknown(other.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ModuleStatus::Active)
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Active => f.write_str("active"),
            ModuleStatus::Inactive => f.write_str("inactive"),
            ModuleStatus::Unknown(raw) if raw.is_empty() => f.write_str("unknown"),
            ModuleStatus::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

/// Body of `GET /admin/status`: module name to raw status string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StatusMap(pub HashMap<String, Value>);

impl StatusMap {
    /// Raw status text of `module`; empty when the server did not report it.
    pub fn raw(&self, module: Module) -> String {
        match self.0.get(module.name()) {
            Some(Value::String(status)) => status.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn status(&self, module: Module) -> ModuleStatus {
        ModuleStatus::from_wire(&self.raw(module))
    }
}
