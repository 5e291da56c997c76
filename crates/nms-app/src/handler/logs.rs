//! Log view handlers

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_logs_requested(state: &mut AppState) -> UpdateResult {
    if state.logs.loading {
        return UpdateResult::none();
    }
    state.logs.loading = true;
    state.logs.last_error = None;
    UpdateResult::action(UpdateAction::FetchLogs)
}

pub fn handle_logs_loaded(state: &mut AppState, lines: Vec<String>) -> UpdateResult {
    state.logs.loading = false;
    state.logs.lines = lines;
    UpdateResult::none()
}

pub fn handle_logs_load_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.logs.loading = false;
    state.logs.last_error = Some(error);
    UpdateResult::none()
}
