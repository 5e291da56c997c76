//! # nms-client - Backend Transport Client
//!
//! The single point of contact with the NMS backend REST API. Every
//! backend operation the console performs: session management, device
//! inventory, connectivity probes, vendor lookup, backup scheduling, log
//! retrieval: is one method on [`ApiClient`], one HTTP call, and one
//! explicit decoding contract.
//!
//! Build one client and share it:
//!
//! ```no_run
//! use std::sync::Arc;
//! use nms_client::{ApiClient, ClientConfig};
//!
//! # fn main() -> nms_core::Result<()> {
//! let client = Arc::new(ApiClient::new(ClientConfig::new("http://localhost:8080"))?);
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{ApiClient, ClientConfig, DeviceQuery};
