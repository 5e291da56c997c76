//! NMS Console - headless client for a network-device management backend
//!
//! This facade crate re-exports the workspace members:
//!
//! - [`core`] ([`nms_core`]): domain types, filters, schedules, errors
//! - [`client`] ([`nms_client`]): the typed HTTP transport client
//! - [`app`] ([`nms_app`]): state controllers and the engine event loop
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//! use nms_console::client::{ApiClient, ClientConfig};
//! use nms_console::app::{Engine, Message};
//!
//! # async fn wire() -> nms_console::core::Result<()> {
//! nms_console::core::logging::init()?;
//! let config = nms_console::app::config::load(None)?;
//!
//! let mut client_config = ClientConfig::new(&config.server.base_url);
//! client_config.request_timeout =
//!     std::time::Duration::from_secs(config.server.request_timeout_secs);
//! let client = Arc::new(ApiClient::new(client_config)?);
//!
//! let engine = Engine::new(client);
//! let tx = engine.sender();
//! tx.send(Message::SessionCheckRequested).await.ok();
//! let _final_state = engine.run().await;
//! # Ok(())
//! # }
//! ```

pub use nms_app as app;
pub use nms_client as client;
pub use nms_core as core;

/// Common imports for consumers of the console crates
pub mod prelude {
    pub use nms_app::{AppState, Engine, Message};
    pub use nms_client::{ApiClient, ClientConfig, DeviceQuery};
    pub use nms_core::prelude::*;
    pub use nms_core::{DeviceKind, DeviceRecord, NewDevice};
}
