//! Application state (Model in TEA pattern)

use std::time::Duration;

use nms_core::{DeviceFilter, DeviceRecord, NewDevice};

/// Rows shown per inventory page. The backend pages its responses the same
/// way, so the window size doubles as the fetch granularity.
pub const ROWS_PER_PAGE: usize = 10;

/// Seconds between detail-view auto-refresh fetches.
pub const REFRESH_INTERVAL_SECS: u32 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Session State
// ─────────────────────────────────────────────────────────────────────────────

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// Not yet probed
    #[default]
    Unknown,
    /// Session probe in flight
    Checking,
    /// No valid session; the login screen is shown
    LoggedOut,
    /// Login request in flight
    LoggingIn,
    /// Session cookie accepted
    LoggedIn,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub phase: AuthPhase,
    /// User token from the last successful login
    pub user: Option<String>,
    /// Last credential/session error, shown on the login screen
    pub last_error: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.phase == AuthPhase::LoggedIn
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inventory State
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of fetch the inventory is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingKind {
    #[default]
    None,
    /// First load of the view
    Initial,
    /// A page change
    Pagination,
    /// Reload after an add/delete mutation
    Mutation,
}

/// State of the device list view.
///
/// Fetches are identified by a monotonically increasing sequence number.
/// Only the response matching the *latest issued* request is applied;
/// anything older is dropped even if it arrives later, so out-of-order
/// pagination responses can never clobber newer state.
#[derive(Debug, Default)]
pub struct InventoryState {
    /// The currently loaded device set (one backend page)
    pub devices: Vec<DeviceRecord>,
    /// Local filter facets; never trigger a fetch
    pub filter: DeviceFilter,
    /// 1-indexed page
    pub page: u32,
    pub loading: LoadingKind,
    /// Error from the most recent failed fetch or mutation
    pub last_error: Option<String>,

    /// Total managed-device count (display only, never used for paging)
    pub total_count: Option<u64>,
    /// Backend process uptime (display only)
    pub system_uptime: Option<Duration>,

    /// Vendor string produced by the last auto-detect lookup, feeding the
    /// add-device form
    pub detected_vendor: Option<String>,
    pub detecting_vendor: bool,

    /// Highest sequence number handed out so far
    next_seq: u64,
    /// Sequence number of the one fetch allowed to update `devices`
    pending_seq: Option<u64>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// Allocate the sequence number for a new fetch and mark it as the
    /// only one whose response will be applied.
    pub fn issue_fetch(&mut self) -> u64 {
        self.next_seq += 1;
        self.pending_seq = Some(self.next_seq);
        self.next_seq
    }

    /// Whether a response with this sequence number is still current
    pub fn accepts(&self, seq: u64) -> bool {
        self.pending_seq == Some(seq)
    }

    /// Mark the pending fetch as settled
    pub fn settle(&mut self) {
        self.pending_seq = None;
        self.loading = LoadingKind::None;
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.pending_seq.is_some()
    }

    /// The filtered subset, in load order
    pub fn filtered(&self) -> Vec<&DeviceRecord> {
        self.filter.apply(&self.devices)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Number of local pages over the filtered subset
    pub fn page_count(&self) -> u32 {
        (self.filtered_len().div_ceil(ROWS_PER_PAGE)) as u32
    }

    /// The visible window: the current page slice of the filtered subset
    pub fn visible(&self) -> Vec<&DeviceRecord> {
        let start = (self.page.saturating_sub(1) as usize) * ROWS_PER_PAGE;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(ROWS_PER_PAGE)
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail View State
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle of the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    /// Entry fetch in flight
    Loading,
    /// Device data on screen, countdown running
    Ready,
    /// The backend no longer knows this device
    Missing,
    /// Entry fetch failed: fatal for this view, no automatic retry
    Failed { error: String },
}

/// One connectivity probe (ping or TCP) on the detail view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProbeRun {
    #[default]
    Idle,
    Running,
    Done {
        output: String,
    },
    Failed {
        error: String,
    },
}

/// State of a single device's detail view.
///
/// The countdown resets to the full interval the moment a refresh is
/// triggered (not when it completes) so a slow response never stalls the
/// visible timer. `refresh_in_flight` is the single in-flight guard: a
/// countdown expiry while a refresh is still outstanding resets the timer
/// but does not issue a second fetch.
#[derive(Debug)]
pub struct DetailState {
    pub device_id: i64,
    pub phase: DetailPhase,
    pub device: Option<DeviceRecord>,

    /// Seconds until the next auto-refresh
    pub time_left: u32,
    /// Countdown length, normally [`REFRESH_INTERVAL_SECS`]; configurable
    /// so tests can run an artificially short timer
    pub refresh_interval: u32,
    /// True while an auto-refresh fetch is outstanding
    pub refresh_in_flight: bool,

    pub ping: ProbeRun,
    pub tcp: ProbeRun,
    /// Last port the TCP form rejected, for the inline validation message
    pub port_error: Option<String>,

    /// True while a delete request is outstanding
    pub deleting: bool,
    pub last_error: Option<String>,
}

impl DetailState {
    pub fn new(device_id: i64) -> Self {
        Self::with_interval(device_id, REFRESH_INTERVAL_SECS)
    }

    pub fn with_interval(device_id: i64, refresh_interval: u32) -> Self {
        Self {
            device_id,
            phase: DetailPhase::Loading,
            device: None,
            time_left: refresh_interval,
            refresh_interval,
            refresh_in_flight: false,
            ping: ProbeRun::Idle,
            tcp: ProbeRun::Idle,
            port_error: None,
            deleting: false,
            last_error: None,
        }
    }

    /// Restart the countdown from the full interval
    pub fn rearm_countdown(&mut self) {
        self.time_left = self.refresh_interval;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backup Schedule Panel State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SchedulePanelState {
    /// Human-readable description of the active schedule, `None` when no
    /// job is scheduled
    pub status: Option<String>,
    pub loading: bool,
    /// True while a create or delete request is outstanding; the panel
    /// never shows "scheduled" before the backend confirms
    pub submitting: bool,
    pub last_error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Log View State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LogViewState {
    /// Raw backend log lines, ANSI escapes included
    pub lines: Vec<String>,
    pub loading: bool,
    pub last_error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// App State
// ─────────────────────────────────────────────────────────────────────────────

/// The whole application model
#[derive(Debug, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub inventory: InventoryState,
    /// Present only while a device detail view is open
    pub detail: Option<DetailState>,
    pub schedule: SchedulePanelState,
    pub logs: LogViewState,

    /// Countdown length for newly opened detail views
    pub refresh_interval_secs: u32,

    should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inventory: InventoryState::new(),
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            ..Default::default()
        }
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Drop everything tied to the old session after a logout or a
    /// session rejection
    pub fn reset_session_scoped_state(&mut self) {
        self.inventory = InventoryState::new();
        self.detail = None;
        self.schedule = SchedulePanelState::default();
        self.logs = LogViewState::default();
    }
}
