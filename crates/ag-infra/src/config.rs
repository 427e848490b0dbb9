//! Configuration loader
//!
//! Reads a TOML file and maps it to [`AppConfig`]. Value defaults live in
//! the DTO; this module only deals with the file.

use std::path::Path;

use anyhow::Context;
use tracing::warn;

use ag_core::config::AppConfig;

/// Load configuration from a TOML file.
///
/// A missing file yields [`AppConfig::default`]. Unreadable or malformed
/// files are errors.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
