//! Device list handlers: paging, filtering, mutations, dashboard counters
//!
//! Paging fetches from the backend; filter and search changes are purely
//! local and reset the page to 1. Responses carry the sequence number of
//! the request that produced them, and only the latest issued request may
//! update the device set: an older response arriving late is dropped.

use std::time::Duration;

use tracing::debug;

use nms_core::{DeviceFilter, DeviceRecord, KindFilter, NewDevice, StatusFilter};

use crate::message::Message;
use crate::state::{AppState, LoadingKind};

use super::{UpdateAction, UpdateResult};

pub fn handle_inventory_requested(state: &mut AppState) -> UpdateResult {
    let inventory = &mut state.inventory;
    inventory.page = 1;
    if inventory.loading == LoadingKind::None {
        inventory.loading = LoadingKind::Initial;
    }
    inventory.last_error = None;
    let seq = inventory.issue_fetch();
    UpdateResult::message_and_action(
        Message::DashboardCountersRequested,
        UpdateAction::FetchDevices { seq, page: 1 },
    )
}

pub fn handle_page_requested(state: &mut AppState, page: u32) -> UpdateResult {
    let inventory = &mut state.inventory;
    let page = page.max(1);
    if page == inventory.page {
        return UpdateResult::none();
    }
    // Page changes move the window; the filter facets stay untouched.
    inventory.page = page;
    if page == 1 {
        // Page 1 is always in hand from the initial load; no fetch.
        return UpdateResult::none();
    }
    // A new page request supersedes any outstanding one: the fresh
    // sequence number invalidates the previous response on arrival.
    inventory.loading = LoadingKind::Pagination;
    let seq = inventory.issue_fetch();
    UpdateResult::action(UpdateAction::FetchDevices { seq, page })
}

pub fn handle_search_changed(state: &mut AppState, search: String) -> UpdateResult {
    state.inventory.filter.search = search;
    state.inventory.page = 1;
    UpdateResult::none()
}

pub fn handle_status_filter_changed(state: &mut AppState, status: StatusFilter) -> UpdateResult {
    state.inventory.filter.status = status;
    state.inventory.page = 1;
    UpdateResult::none()
}

pub fn handle_kind_filter_changed(state: &mut AppState, kind: KindFilter) -> UpdateResult {
    state.inventory.filter.kind = kind;
    state.inventory.page = 1;
    UpdateResult::none()
}

pub fn handle_filters_cleared(state: &mut AppState) -> UpdateResult {
    state.inventory.filter = DeviceFilter::default();
    state.inventory.page = 1;
    UpdateResult::none()
}

pub fn handle_devices_loaded(
    state: &mut AppState,
    seq: u64,
    devices: Vec<DeviceRecord>,
) -> UpdateResult {
    let inventory = &mut state.inventory;
    if !inventory.accepts(seq) {
        debug!("dropping stale device list response (seq {seq})");
        return UpdateResult::none();
    }
    inventory.devices = devices;
    inventory.settle();
    UpdateResult::none()
}

pub fn handle_device_list_failed(state: &mut AppState, seq: u64, error: String) -> UpdateResult {
    let inventory = &mut state.inventory;
    if !inventory.accepts(seq) {
        debug!("dropping stale device list failure (seq {seq}): {error}");
        return UpdateResult::none();
    }
    inventory.settle();
    inventory.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_new_device_submitted(state: &mut AppState, device: NewDevice) -> UpdateResult {
    if let Err(e) = device.validate() {
        state.inventory.last_error = Some(e.to_string());
        return UpdateResult::none();
    }
    state.inventory.loading = LoadingKind::Mutation;
    state.inventory.last_error = None;
    UpdateResult::action(UpdateAction::UploadDevice(device))
}

/// Adding always returns the user to the first page of the full,
/// unfiltered reload: that is where the new row (with its assigned id)
/// shows up.
pub fn handle_device_uploaded(state: &mut AppState) -> UpdateResult {
    let inventory = &mut state.inventory;
    inventory.filter = DeviceFilter::default();
    inventory.page = 1;
    inventory.detected_vendor = None;
    inventory.loading = LoadingKind::Mutation;
    let seq = inventory.issue_fetch();
    UpdateResult::message_and_action(
        Message::DashboardCountersRequested,
        UpdateAction::FetchDevices { seq, page: 1 },
    )
}

pub fn handle_device_upload_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.inventory.loading = LoadingKind::None;
    state.inventory.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_vendor_detect_requested(state: &mut AppState, ip_address: String) -> UpdateResult {
    if ip_address.trim().is_empty() || state.inventory.detecting_vendor {
        return UpdateResult::none();
    }
    state.inventory.detecting_vendor = true;
    UpdateResult::action(UpdateAction::LookupVendor { ip_address })
}

pub fn handle_vendor_detected(state: &mut AppState, vendor: Option<String>) -> UpdateResult {
    state.inventory.detecting_vendor = false;
    // An undetermined vendor leaves the form field untouched.
    if vendor.is_some() {
        state.inventory.detected_vendor = vendor;
    }
    UpdateResult::none()
}

pub fn handle_dashboard_counters_requested(_state: &mut AppState) -> UpdateResult {
    UpdateResult::message_and_action(
        Message::SystemUptimeRequested,
        UpdateAction::FetchDeviceCount,
    )
}

pub fn handle_system_uptime_requested(_state: &mut AppState) -> UpdateResult {
    UpdateResult::action(UpdateAction::FetchSystemUptime)
}

pub fn handle_device_count_loaded(state: &mut AppState, count: u64) -> UpdateResult {
    state.inventory.total_count = Some(count);
    UpdateResult::none()
}

pub fn handle_system_uptime_loaded(state: &mut AppState, uptime: Duration) -> UpdateResult {
    state.inventory.system_uptime = Some(uptime);
    UpdateResult::none()
}
