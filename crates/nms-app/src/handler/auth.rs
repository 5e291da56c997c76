//! Session/login handlers

use tracing::info;

use crate::message::Message;
use crate::state::{AppState, AuthPhase};

use super::{UpdateAction, UpdateResult};

pub fn handle_session_check_requested(state: &mut AppState) -> UpdateResult {
    state.auth.phase = AuthPhase::Checking;
    UpdateResult::action(UpdateAction::CheckSession)
}

pub fn handle_session_checked(state: &mut AppState, authenticated: bool) -> UpdateResult {
    if authenticated {
        state.auth.phase = AuthPhase::LoggedIn;
        state.auth.last_error = None;
        // A valid session goes straight to the dashboard.
        UpdateResult::message(Message::InventoryRequested)
    } else {
        state.auth.phase = AuthPhase::LoggedOut;
        UpdateResult::none()
    }
}

pub fn handle_session_check_failed(state: &mut AppState, error: String) -> UpdateResult {
    // Can't tell whether the session is valid; fall back to the login
    // screen and surface the transport error there.
    state.auth.phase = AuthPhase::LoggedOut;
    state.auth.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_login_submitted(
    state: &mut AppState,
    username: String,
    password: String,
) -> UpdateResult {
    if state.auth.phase == AuthPhase::LoggingIn {
        // One login attempt at a time.
        return UpdateResult::none();
    }
    state.auth.phase = AuthPhase::LoggingIn;
    state.auth.last_error = None;
    UpdateResult::action(UpdateAction::Login { username, password })
}

pub fn handle_login_succeeded(state: &mut AppState, user: String) -> UpdateResult {
    info!("login succeeded for {user}");
    state.auth.phase = AuthPhase::LoggedIn;
    state.auth.user = Some(user);
    state.auth.last_error = None;
    UpdateResult::message(Message::InventoryRequested)
}

pub fn handle_login_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.auth.phase = AuthPhase::LoggedOut;
    state.auth.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_logout_requested(state: &mut AppState) -> UpdateResult {
    if !state.auth.is_logged_in() {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::Logout)
}

pub fn handle_logged_out(state: &mut AppState) -> UpdateResult {
    state.auth.phase = AuthPhase::LoggedOut;
    state.auth.user = None;
    state.reset_session_scoped_state();
    UpdateResult::none()
}

/// Some operation came back 401/403: the stored session is no longer
/// valid. Tear down session-scoped state so the login screen comes back,
/// keeping the reason visible.
pub fn handle_session_rejected(state: &mut AppState, error: String) -> UpdateResult {
    state.auth.phase = AuthPhase::LoggedOut;
    state.auth.user = None;
    state.auth.last_error = Some(error);
    state.reset_session_scoped_state();
    UpdateResult::none()
}
