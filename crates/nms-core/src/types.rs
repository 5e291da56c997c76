//! Device domain types shared across the console
//!
//! Wire shapes mirror the backend's camelCase JSON. Every telemetry field
//! on [`DeviceRecord`] is optional or defaulted: the backend fills them in
//! progressively as SNMP discovery completes, and a half-populated record
//! must still deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of managed network device
///
/// The backend stores the kebab-case string verbatim, so the serde renames
/// below are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Switch,
    Server,
    Firewall,
    Router,
    AccessPoint,
    LoadBalancer,
    Storage,
    Vpn,
}

impl DeviceKind {
    /// All kinds, in the order the add-device form offers them
    pub const ALL: [DeviceKind; 8] = [
        DeviceKind::Switch,
        DeviceKind::Server,
        DeviceKind::Firewall,
        DeviceKind::Router,
        DeviceKind::AccessPoint,
        DeviceKind::LoadBalancer,
        DeviceKind::Storage,
        DeviceKind::Vpn,
    ];

    /// The wire string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Switch => "switch",
            DeviceKind::Server => "server",
            DeviceKind::Firewall => "firewall",
            DeviceKind::Router => "router",
            DeviceKind::AccessPoint => "access-point",
            DeviceKind::LoadBalancer => "load-balancer",
            DeviceKind::Storage => "storage",
            DeviceKind::Vpn => "vpn",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate spaces the way the UI labels are written ("access point")
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "-");
        DeviceKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| Error::invalid_request(format!("unknown device kind: {s}")))
    }
}

/// Derived liveness of a device, from the backend's `reachable` probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

/// A device as entered by the user in the add-device form
///
/// The backend is the source of truth: this is sent once and the assigned
/// id is only observable through a subsequent list reload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub ip_address: String,
    pub place: String,
    /// Optional, may be filled by the vendor auto-detect lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl NewDevice {
    pub fn new(
        name: impl Into<String>,
        kind: DeviceKind,
        ip_address: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ip_address: ip_address.into(),
            place: place.into(),
            vendor: None,
        }
    }

    /// Reject blank required fields before the device goes anywhere near
    /// the wire. The ip address is not validated beyond non-empty; the
    /// backend accepts dotted-quad with an optional CIDR suffix.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_request("device name must not be empty"));
        }
        if self.ip_address.trim().is_empty() {
            return Err(Error::invalid_request("device ip address must not be empty"));
        }
        if self.place.trim().is_empty() {
            return Err(Error::invalid_request("device place must not be empty"));
        }
        Ok(())
    }
}

/// Composite key the backend's delete contract requires
///
/// The delete endpoint matches on id, ip address and kind together, not on
/// id alone. All three travel as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceKey {
    pub id: i64,
    pub ip_address: String,
    pub kind: DeviceKind,
}

impl DeviceKey {
    pub fn new(id: i64, ip_address: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id,
            ip_address: ip_address.into(),
            kind,
        }
    }
}

/// A single interface row from the backend's SNMP interface walk
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub name: String,
    /// Operational state (up/down)
    pub state: bool,
    /// Inbound packet counter
    #[serde(rename = "in", default)]
    pub packets_in: u64,
    /// Outbound packet counter
    #[serde(rename = "out", default)]
    pub packets_out: u64,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub in_errors: Option<u64>,
    #[serde(default)]
    pub out_errors: Option<u64>,
}

/// A device as reported by the backend, identity plus telemetry
///
/// Refreshed in place by polling; removed from view only after a confirmed
/// delete acknowledgment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Server-assigned identity
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub ip_address: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,

    // SNMP system group
    #[serde(default)]
    pub sys_name: Option<String>,
    #[serde(default)]
    pub sys_descr: Option<String>,
    #[serde(default)]
    pub uptime: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,

    // Liveness probing
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub latency: Option<f64>,
    #[serde(default)]
    pub packet_loss: Option<f64>,

    // Vendor-specific metrics
    #[serde(default)]
    pub cpu_load: Option<f64>,
    #[serde(default)]
    pub memory_used: Option<u64>,
    #[serde(default)]
    pub memory_free: Option<u64>,
    #[serde(default)]
    pub memory_total: Option<u64>,
    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub device_network_interfaces: Vec<NetworkInterface>,
}

impl DeviceRecord {
    /// Liveness as the UI presents it
    pub fn status(&self) -> DeviceStatus {
        if self.reachable {
            DeviceStatus::Online
        } else {
            DeviceStatus::Offline
        }
    }

    /// Memory utilization in percent, when the backend reported totals
    pub fn memory_percent(&self) -> Option<f64> {
        match (self.memory_used, self.memory_total) {
            (Some(used), Some(total)) if total > 0 => Some(used as f64 / total as f64 * 100.0),
            _ => None,
        }
    }

    /// The composite key the delete endpoint requires
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.id, self.ip_address.clone(), self.kind)
    }
}
