//! Client configuration loading.
//!
//! Reads `config.toml` and applies environment overrides on top.

use crate::paths::TaskdeckPaths;
use std::path::Path;
use taskdeck_core::config::ClientConfig;
use taskdeck_core::error::Result;

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "TASKDECK_BASE_URL";

/// Loads configuration from `path`, or from the default location when `None`.
///
/// A missing file yields defaults. A malformed file is a
/// `TaskdeckError::Serialization`.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => match TaskdeckPaths::config_file() {
            Ok(path) => read_config_file(&path)?,
            Err(e) => {
                tracing::debug!("[ConfigStorage] No config directory ({}), using defaults", e);
                ClientConfig::default()
            }
        },
    };
    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Applies overrides looked up through `lookup` (normally the process environment).
pub fn apply_env_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientConfig {
    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("[ConfigStorage] base_url overridden by {}", BASE_URL_ENV);
        config.base_url = base_url;
    }
    config
}

fn read_config_file(path: &Path) -> Result<ClientConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("[ConfigStorage] {} not found, using defaults", path.display());
            Ok(ClientConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
