//! The engine event loop
//!
//! Single-threaded and cooperative: one mpsc channel carries every
//! message, a 1-second interval feeds `Tick` for the detail countdown,
//! and background tasks exist only at the network boundary (spawned by
//! the action dispatcher). Each inbound message runs through the update
//! function until its follow-up chain is exhausted before the next one is
//! taken.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use nms_client::ApiClient;

use crate::actions;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Capacity of the message channel; bursts come from fan-out fetches and
/// stay well below this.
const MSG_CHANNEL_CAPACITY: usize = 256;

/// Owns the application state and drives it with messages.
pub struct Engine {
    state: AppState,
    client: Arc<ApiClient>,
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,
}

impl Engine {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::from_state(AppState::new(), client)
    }

    /// Start from a pre-built state (used by tests)
    pub fn from_state(state: AppState, client: Arc<ApiClient>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(MSG_CHANNEL_CAPACITY);
        Self {
            state,
            client,
            msg_tx,
            msg_rx,
        }
    }

    /// Handle for feeding messages in from outside (UI events, tests)
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run until [`Message::Quit`] arrives or every sender is dropped.
    /// Returns the final state.
    pub async fn run(mut self) -> AppState {
        let period = Duration::from_secs(1);
        // First tick after one full period, not immediately.
        let mut tick = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    process_message(&mut self.state, Message::Tick, &self.client, &self.msg_tx);
                }
                maybe_msg = self.msg_rx.recv() => {
                    match maybe_msg {
                        Some(msg) => {
                            process_message(&mut self.state, msg, &self.client, &self.msg_tx);
                        }
                        None => break,
                    }
                }
            }
            if self.state.should_quit() {
                break;
            }
        }

        // Dropping msg_rx here detaches any still-running background
        // tasks; their results land on a closed channel and are dropped.
        self.state
    }
}

/// Process a message through the TEA update function, chasing follow-up
/// messages and dispatching background actions.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    client: &Arc<ApiClient>,
    msg_tx: &mpsc::Sender<Message>,
) {
    let mut next = Some(message);
    while let Some(msg) = next {
        let result = handler::update(state, msg);
        if let Some(action) = result.action {
            actions::handle_action(action, client.clone(), msg_tx.clone());
        }
        next = result.message;
    }
}
