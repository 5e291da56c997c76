//! Settings loader for the console's config.toml

use std::path::{Path, PathBuf};

use nms_core::prelude::*;

use super::types::ConsoleConfig;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = "nms-console";

/// Env var overriding the configured backend origin. Wins over the file.
pub const URL_ENV_VAR: &str = "NMS_CONSOLE_URL";

/// Lower bound for the detail auto-refresh cadence.
pub const MIN_REFRESH_SECS: u32 = 5;

/// Default location: `<config-dir>/nms-console/config.toml`
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// Load settings, layering in priority order:
/// 1. built-in defaults
/// 2. the TOML file (if present)
/// 3. the `NMS_CONSOLE_URL` env override
///
/// A missing file is fine (defaults apply); a file that exists but does
/// not parse is a hard [`Error::Config`].
pub fn load(path: Option<&Path>) -> Result<ConsoleConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    let mut config = if path.exists() {
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str::<ConsoleConfig>(&raw).map_err(|e| {
            Error::config(format!("failed to parse {}: {e}", path.display()))
        })?
    } else {
        debug!("no config file at {}, using defaults", path.display());
        ConsoleConfig::default()
    };

    if let Ok(url) = std::env::var(URL_ENV_VAR) {
        if !url.trim().is_empty() {
            config.server.base_url = url;
        }
    }

    config.refresh.detail_interval_secs =
        config.refresh.detail_interval_secs.max(MIN_REFRESH_SECS);

    Ok(config)
}
