//! Device detail view handlers: entry fetch, auto-refresh countdown,
//! connectivity probes, delete
//!
//! The countdown is driven by the engine's 1-second `Tick`. Hitting zero
//! resets the timer immediately and emits a refresh only when none is
//! outstanding; a tick that lands while a refresh is in flight is
//! coalesced. Responses for a view that has been closed (or re-opened on
//! a different device) are dropped on arrival.

use tracing::debug;

use nms_core::DeviceRecord;

use crate::message::Message;
use crate::state::{AppState, DetailPhase, DetailState, ProbeRun};

use super::{UpdateAction, UpdateResult};

pub fn handle_detail_opened(state: &mut AppState, device_id: i64) -> UpdateResult {
    state.detail = Some(DetailState::with_interval(
        device_id,
        state.refresh_interval_secs,
    ));
    UpdateResult::action(UpdateAction::FetchDevice { device_id })
}

/// Navigating away tears the view down; the engine stops receiving
/// refresh actions for it and any in-flight response will be dropped.
pub fn handle_detail_closed(state: &mut AppState) -> UpdateResult {
    state.detail = None;
    UpdateResult::none()
}

pub fn handle_detail_loaded(
    state: &mut AppState,
    device_id: i64,
    device: Option<DeviceRecord>,
) -> UpdateResult {
    let Some(detail) = state.detail.as_mut().filter(|d| d.device_id == device_id) else {
        debug!("dropping detail load for closed view (device {device_id})");
        return UpdateResult::none();
    };
    match device {
        Some(device) => {
            detail.device = Some(device);
            detail.phase = DetailPhase::Ready;
            detail.rearm_countdown();
        }
        None => detail.phase = DetailPhase::Missing,
    }
    UpdateResult::none()
}

pub fn handle_detail_load_failed(
    state: &mut AppState,
    device_id: i64,
    error: String,
) -> UpdateResult {
    let Some(detail) = state.detail.as_mut().filter(|d| d.device_id == device_id) else {
        return UpdateResult::none();
    };
    // Entry failure is fatal for this view; no automatic retry.
    detail.phase = DetailPhase::Failed { error };
    UpdateResult::none()
}

/// One second elapsed. Only a Ready detail view counts down; the timer
/// resets the moment it fires so a slow refresh never stalls the display.
pub fn handle_tick(state: &mut AppState) -> UpdateResult {
    let Some(detail) = state.detail.as_mut() else {
        return UpdateResult::none();
    };
    if detail.phase != DetailPhase::Ready {
        return UpdateResult::none();
    }

    detail.time_left = detail.time_left.saturating_sub(1);
    if detail.time_left > 0 {
        return UpdateResult::none();
    }

    detail.rearm_countdown();
    if detail.refresh_in_flight {
        // Single in-flight guard: coalesce this expiry into the pending
        // refresh instead of stacking a second fetch.
        debug!(
            "refresh still in flight for device {}, skipping tick",
            detail.device_id
        );
        return UpdateResult::none();
    }
    detail.refresh_in_flight = true;
    UpdateResult::action(UpdateAction::RefreshDevice {
        device_id: detail.device_id,
    })
}

pub fn handle_detail_refreshed(
    state: &mut AppState,
    device_id: i64,
    device: Option<DeviceRecord>,
) -> UpdateResult {
    let Some(detail) = state.detail.as_mut().filter(|d| d.device_id == device_id) else {
        debug!("dropping refresh result for closed view (device {device_id})");
        return UpdateResult::none();
    };
    detail.refresh_in_flight = false;
    match device {
        Some(device) => detail.device = Some(device),
        // The device disappeared between refreshes (deleted elsewhere).
        None => detail.phase = DetailPhase::Missing,
    }
    UpdateResult::none()
}

pub fn handle_detail_refresh_failed(
    state: &mut AppState,
    device_id: i64,
    error: String,
) -> UpdateResult {
    let Some(detail) = state.detail.as_mut().filter(|d| d.device_id == device_id) else {
        return UpdateResult::none();
    };
    // Keep showing the stale data; the next countdown will try again.
    detail.refresh_in_flight = false;
    debug!("refresh failed for device {device_id}: {error}");
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────
// Connectivity probes
// ─────────────────────────────────────────────────────────────────

/// Ping is a one-shot probe: it neither resets nor pauses the countdown,
/// and runs happily alongside an in-flight refresh.
pub fn handle_ping_requested(state: &mut AppState) -> UpdateResult {
    let Some(detail) = state.detail.as_mut() else {
        return UpdateResult::none();
    };
    let Some(device) = detail.device.as_ref() else {
        return UpdateResult::none();
    };
    if detail.ping == ProbeRun::Running {
        return UpdateResult::none();
    }
    detail.ping = ProbeRun::Running;
    UpdateResult::action(UpdateAction::Ping {
        ip_address: device.ip_address.clone(),
    })
}

pub fn handle_ping_completed(state: &mut AppState, output: String) -> UpdateResult {
    if let Some(detail) = state.detail.as_mut() {
        detail.ping = ProbeRun::Done { output };
    }
    UpdateResult::none()
}

pub fn handle_ping_failed(state: &mut AppState, error: String) -> UpdateResult {
    if let Some(detail) = state.detail.as_mut() {
        detail.ping = ProbeRun::Failed { error };
    }
    UpdateResult::none()
}

/// TCP probe with the user-entered port. An out-of-range port is rejected
/// here: no action is emitted, so nothing ever reaches the network.
pub fn handle_tcp_test_requested(state: &mut AppState, port: u32) -> UpdateResult {
    let Some(detail) = state.detail.as_mut() else {
        return UpdateResult::none();
    };
    let Some(device) = detail.device.as_ref() else {
        return UpdateResult::none();
    };
    if port == 0 || port > 65535 {
        detail.port_error = Some(format!("Port {port} is out of range (1-65535)"));
        return UpdateResult::none();
    }
    if detail.tcp == ProbeRun::Running {
        return UpdateResult::none();
    }
    detail.port_error = None;
    detail.tcp = ProbeRun::Running;
    UpdateResult::action(UpdateAction::TcpTest {
        ip_address: device.ip_address.clone(),
        port,
    })
}

pub fn handle_tcp_test_completed(state: &mut AppState, output: String) -> UpdateResult {
    if let Some(detail) = state.detail.as_mut() {
        detail.tcp = ProbeRun::Done { output };
    }
    UpdateResult::none()
}

pub fn handle_tcp_test_failed(state: &mut AppState, error: String) -> UpdateResult {
    if let Some(detail) = state.detail.as_mut() {
        detail.tcp = ProbeRun::Failed { error };
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────

pub fn handle_delete_requested(state: &mut AppState) -> UpdateResult {
    let Some(detail) = state.detail.as_mut() else {
        return UpdateResult::none();
    };
    let Some(device) = detail.device.as_ref() else {
        return UpdateResult::none();
    };
    if detail.deleting {
        return UpdateResult::none();
    }
    detail.deleting = true;
    detail.last_error = None;
    // The backend's delete contract wants the full composite key.
    UpdateResult::action(UpdateAction::DeleteDevice(device.key()))
}

/// A confirmed delete tears the view down (stopping its countdown) and
/// only then reloads the inventory, so no refresh can land on the
/// deleted device.
pub fn handle_device_deleted(state: &mut AppState, device_id: i64) -> UpdateResult {
    match state.detail.as_ref() {
        Some(detail) if detail.device_id == device_id => {
            state.detail = None;
            // Full reload semantics: back to the unfiltered first page.
            state.inventory.filter = nms_core::DeviceFilter::default();
            UpdateResult::message(Message::InventoryRequested)
        }
        _ => UpdateResult::none(),
    }
}

pub fn handle_device_delete_failed(state: &mut AppState, error: String) -> UpdateResult {
    if let Some(detail) = state.detail.as_mut() {
        detail.deleting = false;
        detail.last_error = Some(error);
    }
    UpdateResult::none()
}
