//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `auth`: Session/login handlers
//! - `inventory`: Device list handlers (paging, filtering, mutations)
//! - `detail`: Device detail view handlers (auto-refresh, probes, delete)
//! - `schedule`: Backup schedule panel handlers
//! - `logs`: Log view handlers

pub(crate) mod auth;
pub(crate) mod detail;
pub(crate) mod inventory;
pub(crate) mod logs;
pub(crate) mod schedule;
pub(crate) mod update;


use nms_core::{BackupSchedule, DeviceKey, NewDevice};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update.
///
/// Every variant is one network call; the result comes back as a message.
#[derive(Debug, Clone)]
pub enum UpdateAction {
    // Session
    CheckSession,
    Login { username: String, password: String },
    Logout,

    // Inventory
    /// Fetch a page of the device list. `seq` ties the eventual response
    /// back to this request so stale responses can be dropped.
    FetchDevices { seq: u64, page: u32 },
    UploadDevice(NewDevice),
    LookupVendor { ip_address: String },
    FetchDeviceCount,
    FetchSystemUptime,

    // Detail view
    /// Entry fetch for a freshly opened detail view
    FetchDevice { device_id: i64 },
    /// Periodic auto-refresh fetch for the open detail view
    RefreshDevice { device_id: i64 },
    Ping { ip_address: String },
    TcpTest { ip_address: String, port: u32 },
    DeleteDevice(DeviceKey),

    // Backup schedule
    FetchScheduleStatus,
    CreateSchedule(BackupSchedule),
    DeleteSchedule,

    // Logs
    FetchLogs,
}

/// Result of one update step: an optional follow-up message (processed
/// before the next inbound message) and an optional background action.
#[derive(Debug, Default)]
pub struct UpdateResult {
    pub message: Option<Message>,
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(message: Message) -> Self {
        Self {
            message: Some(message),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn message_and_action(message: Message, action: UpdateAction) -> Self {
        Self {
            message: Some(message),
            action: Some(action),
        }
    }
}
