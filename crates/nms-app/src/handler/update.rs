//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{auth, detail, inventory, logs, schedule, UpdateResult};

/// Process a message and update state.
/// Returns optional follow-up message and/or action.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Tick => detail::handle_tick(state),

        // ─────────────────────────────────────────────────────────
        // Session Messages
        // ─────────────────────────────────────────────────────────
        Message::SessionCheckRequested => auth::handle_session_check_requested(state),
        Message::SessionChecked { authenticated } => {
            auth::handle_session_checked(state, authenticated)
        }
        Message::SessionCheckFailed { error } => auth::handle_session_check_failed(state, error),
        Message::LoginSubmitted { username, password } => {
            auth::handle_login_submitted(state, username, password)
        }
        Message::LoginSucceeded { user } => auth::handle_login_succeeded(state, user),
        Message::LoginFailed { error } => auth::handle_login_failed(state, error),
        Message::LogoutRequested => auth::handle_logout_requested(state),
        Message::LoggedOut => auth::handle_logged_out(state),
        Message::SessionRejected { error } => auth::handle_session_rejected(state, error),

        // ─────────────────────────────────────────────────────────
        // Inventory Messages
        // ─────────────────────────────────────────────────────────
        Message::InventoryRequested => inventory::handle_inventory_requested(state),
        Message::PageRequested(page) => inventory::handle_page_requested(state, page),
        Message::SearchChanged(search) => inventory::handle_search_changed(state, search),
        Message::StatusFilterChanged(status) => {
            inventory::handle_status_filter_changed(state, status)
        }
        Message::KindFilterChanged(kind) => inventory::handle_kind_filter_changed(state, kind),
        Message::FiltersCleared => inventory::handle_filters_cleared(state),
        Message::DevicesLoaded { seq, devices } => {
            inventory::handle_devices_loaded(state, seq, devices)
        }
        Message::DeviceListFailed { seq, error } => {
            inventory::handle_device_list_failed(state, seq, error)
        }
        Message::NewDeviceSubmitted(device) => {
            inventory::handle_new_device_submitted(state, device)
        }
        Message::DeviceUploaded => inventory::handle_device_uploaded(state),
        Message::DeviceUploadFailed { error } => {
            inventory::handle_device_upload_failed(state, error)
        }
        Message::VendorDetectRequested { ip_address } => {
            inventory::handle_vendor_detect_requested(state, ip_address)
        }
        Message::VendorDetected { vendor } => inventory::handle_vendor_detected(state, vendor),
        Message::DashboardCountersRequested => inventory::handle_dashboard_counters_requested(state),
        Message::SystemUptimeRequested => inventory::handle_system_uptime_requested(state),
        Message::DeviceCountLoaded { count } => inventory::handle_device_count_loaded(state, count),
        Message::SystemUptimeLoaded { uptime } => {
            inventory::handle_system_uptime_loaded(state, uptime)
        }

        // ─────────────────────────────────────────────────────────
        // Detail View Messages
        // ─────────────────────────────────────────────────────────
        Message::DetailOpened { device_id } => detail::handle_detail_opened(state, device_id),
        Message::DetailClosed => detail::handle_detail_closed(state),
        Message::DetailLoaded { device_id, device } => {
            detail::handle_detail_loaded(state, device_id, device)
        }
        Message::DetailLoadFailed { device_id, error } => {
            detail::handle_detail_load_failed(state, device_id, error)
        }
        Message::DetailRefreshed { device_id, device } => {
            detail::handle_detail_refreshed(state, device_id, device)
        }
        Message::DetailRefreshFailed { device_id, error } => {
            detail::handle_detail_refresh_failed(state, device_id, error)
        }
        Message::PingRequested => detail::handle_ping_requested(state),
        Message::PingCompleted { output } => detail::handle_ping_completed(state, output),
        Message::PingFailed { error } => detail::handle_ping_failed(state, error),
        Message::TcpTestRequested { port } => detail::handle_tcp_test_requested(state, port),
        Message::TcpTestCompleted { output } => detail::handle_tcp_test_completed(state, output),
        Message::TcpTestFailed { error } => detail::handle_tcp_test_failed(state, error),
        Message::DeleteRequested => detail::handle_delete_requested(state),
        Message::DeviceDeleted { device_id } => detail::handle_device_deleted(state, device_id),
        Message::DeviceDeleteFailed { error } => detail::handle_device_delete_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Backup Schedule Messages
        // ─────────────────────────────────────────────────────────
        Message::ScheduleStatusRequested => schedule::handle_status_requested(state),
        Message::ScheduleStatusLoaded { status } => schedule::handle_status_loaded(state, status),
        Message::ScheduleStatusFailed { error } => schedule::handle_status_failed(state, error),
        Message::ScheduleSubmitted(slot) => schedule::handle_submitted(state, slot),
        Message::ScheduleCreated => schedule::handle_created(state),
        Message::ScheduleCreateFailed { error } => schedule::handle_create_failed(state, error),
        Message::ScheduleDeleteRequested => schedule::handle_delete_requested(state),
        Message::ScheduleDeleted => schedule::handle_deleted(state),
        Message::ScheduleDeleteFailed { error } => schedule::handle_delete_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Log View Messages
        // ─────────────────────────────────────────────────────────
        Message::LogsRequested => logs::handle_logs_requested(state),
        Message::LogsLoaded { lines } => logs::handle_logs_loaded(state, lines),
        Message::LogsLoadFailed { error } => logs::handle_logs_load_failed(state, error),
    }
}
