//! Backup schedule panel handlers
//!
//! The panel manages the single weekly backup job. Nothing here shows as
//! "scheduled" until the backend has confirmed the mutation.

use nms_core::BackupSchedule;

use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_status_requested(state: &mut AppState) -> UpdateResult {
    state.schedule.loading = true;
    state.schedule.last_error = None;
    UpdateResult::action(UpdateAction::FetchScheduleStatus)
}

pub fn handle_status_loaded(state: &mut AppState, status: Option<String>) -> UpdateResult {
    state.schedule.loading = false;
    state.schedule.status = status;
    UpdateResult::none()
}

pub fn handle_status_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.schedule.loading = false;
    state.schedule.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_submitted(state: &mut AppState, slot: BackupSchedule) -> UpdateResult {
    if state.schedule.submitting {
        return UpdateResult::none();
    }
    state.schedule.submitting = true;
    state.schedule.last_error = None;
    UpdateResult::action(UpdateAction::CreateSchedule(slot))
}

pub fn handle_created(state: &mut AppState) -> UpdateResult {
    state.schedule.submitting = false;
    // Re-read the authoritative status instead of synthesizing one.
    UpdateResult::message(Message::ScheduleStatusRequested)
}

pub fn handle_create_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.schedule.submitting = false;
    state.schedule.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_delete_requested(state: &mut AppState) -> UpdateResult {
    if state.schedule.submitting {
        return UpdateResult::none();
    }
    state.schedule.submitting = true;
    state.schedule.last_error = None;
    UpdateResult::action(UpdateAction::DeleteSchedule)
}

pub fn handle_deleted(state: &mut AppState) -> UpdateResult {
    state.schedule.submitting = false;
    state.schedule.status = None;
    UpdateResult::none()
}

pub fn handle_delete_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.schedule.submitting = false;
    state.schedule.last_error = Some(error);
    UpdateResult::none()
}
