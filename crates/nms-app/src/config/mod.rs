//! Configuration: console settings loaded from TOML with env overrides

mod settings;
mod types;

pub use settings::{default_config_path, load, MIN_REFRESH_SECS, URL_ENV_VAR};
pub use types::{ConsoleConfig, RefreshSettings, ServerSettings};
