//! Message types for the application (TEA pattern)

use std::time::Duration;

use nms_core::{BackupSchedule, DeviceRecord, KindFilter, NewDevice, StatusFilter};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// One-second heartbeat for countdown timers
    Tick,

    /// Shut the engine down
    Quit,

    // ─────────────────────────────────────────────────────────
    // Session Messages
    // ─────────────────────────────────────────────────────────
    /// Probe whether the stored session cookie is still accepted
    SessionCheckRequested,
    /// Session probe answered
    SessionChecked { authenticated: bool },
    /// Session probe could not reach the backend
    SessionCheckFailed { error: String },
    /// Login form submitted
    LoginSubmitted { username: String, password: String },
    /// Backend accepted the credentials
    LoginSucceeded { user: String },
    /// Backend rejected the credentials
    LoginFailed { error: String },
    /// Logout requested by the user
    LogoutRequested,
    /// Logout acknowledged (or the session was already gone)
    LoggedOut,
    /// Some operation hit a 401/403: the session is no longer valid
    SessionRejected { error: String },

    // ─────────────────────────────────────────────────────────
    // Inventory Messages
    // ─────────────────────────────────────────────────────────
    /// Load page 1 of the inventory (initial load or full reload)
    InventoryRequested,
    /// User moved to another page
    PageRequested(u32),
    /// Search box content changed
    SearchChanged(String),
    /// Status facet changed
    StatusFilterChanged(StatusFilter),
    /// Device-kind facet changed
    KindFilterChanged(KindFilter),
    /// All filter facets reset
    FiltersCleared,
    /// A device-list fetch finished; `seq` identifies which request
    DevicesLoaded {
        seq: u64,
        devices: Vec<DeviceRecord>,
    },
    /// A device-list fetch failed; `seq` identifies which request
    DeviceListFailed { seq: u64, error: String },
    /// Add-device form submitted
    NewDeviceSubmitted(NewDevice),
    /// Upload acknowledged; the assigned id appears in the reload
    DeviceUploaded,
    /// Upload rejected
    DeviceUploadFailed { error: String },
    /// Vendor auto-detect button pressed for the given address
    VendorDetectRequested { ip_address: String },
    /// Vendor auto-detect answered (absent when undetermined)
    VendorDetected { vendor: Option<String> },
    /// Kick off the display-only dashboard counters
    DashboardCountersRequested,
    /// Follow-up for the second counter fetch
    SystemUptimeRequested,
    /// Total managed-device count answered
    DeviceCountLoaded { count: u64 },
    /// Backend uptime answered
    SystemUptimeLoaded { uptime: Duration },

    // ─────────────────────────────────────────────────────────
    // Detail View Messages
    // ─────────────────────────────────────────────────────────
    /// A device row was opened
    DetailOpened { device_id: i64 },
    /// The detail view was navigated away from
    DetailClosed,
    /// Entry fetch finished (`None` = the device no longer exists)
    DetailLoaded {
        device_id: i64,
        device: Option<DeviceRecord>,
    },
    /// Entry fetch failed: fatal for this view
    DetailLoadFailed { device_id: i64, error: String },
    /// Periodic refresh finished
    DetailRefreshed {
        device_id: i64,
        device: Option<DeviceRecord>,
    },
    /// Periodic refresh failed; the stale data stays on screen
    DetailRefreshFailed { device_id: i64, error: String },
    /// Ping probe button pressed
    PingRequested,
    PingCompleted { output: String },
    PingFailed { error: String },
    /// TCP probe submitted with the user-entered port
    TcpTestRequested { port: u32 },
    TcpTestCompleted { output: String },
    TcpTestFailed { error: String },
    /// Delete button pressed on the displayed device
    DeleteRequested,
    /// Delete acknowledged by the backend
    DeviceDeleted { device_id: i64 },
    DeviceDeleteFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Backup Schedule Messages
    // ─────────────────────────────────────────────────────────
    ScheduleStatusRequested,
    ScheduleStatusLoaded { status: Option<String> },
    ScheduleStatusFailed { error: String },
    ScheduleSubmitted(BackupSchedule),
    ScheduleCreated,
    ScheduleCreateFailed { error: String },
    ScheduleDeleteRequested,
    ScheduleDeleted,
    ScheduleDeleteFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Log View Messages
    // ─────────────────────────────────────────────────────────
    LogsRequested,
    LogsLoaded { lines: Vec<String> },
    LogsLoadFailed { error: String },
}
