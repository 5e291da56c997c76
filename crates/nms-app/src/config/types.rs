//! Configuration types for the NMS console
//!
//! Defines:
//! - `ConsoleConfig` - the whole settings file
//! - `ServerSettings` - backend origin and request timeout
//! - `RefreshSettings` - detail auto-refresh cadence

use serde::{Deserialize, Serialize};

/// The whole `config.toml`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Backend origin the transport client is pinned to
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: 30,
        }
    }
}

/// Detail view refresh settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Seconds between detail-view auto-refresh fetches.
    /// Clamped to a minimum when loaded; see `settings::MIN_REFRESH_SECS`.
    pub detail_interval_secs: u32,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            detail_interval_secs: crate::state::REFRESH_INTERVAL_SECS,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
