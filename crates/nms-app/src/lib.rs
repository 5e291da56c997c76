//! # nms-app - State Controllers and Event Loop
//!
//! The message-driven heart of the NMS console, TEA-style:
//!
//! - [`Message`] - everything that can happen
//! - [`AppState`] - the whole model (auth, inventory, detail view,
//!   schedule panel, log view)
//! - [`handler::update`] - the pure state-transition function
//! - [`handler::UpdateAction`] - network work requested by a transition
//! - [`actions`] - spawns one tokio task per action against the shared
//!   [`nms_client::ApiClient`] and feeds results back as messages
//! - [`Engine`] - the select! loop tying it together, with the 1-second
//!   tick that drives the detail view's auto-refresh countdown
//!
//! The update function is pure and synchronous; every test of paging,
//! filtering, the refresh countdown, or race handling drives it directly
//! with messages and inspects the state: no network, no timers.

pub mod actions;
pub mod config;
pub mod engine;
pub mod handler;
pub mod message;
pub mod state;

pub use config::ConsoleConfig;
pub use engine::{process_message, Engine};
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use state::{
    AppState, AuthPhase, AuthState, DetailPhase, DetailState, InventoryState, LoadingKind,
    LogViewState, ProbeRun, SchedulePanelState, REFRESH_INTERVAL_SECS, ROWS_PER_PAGE,
};
