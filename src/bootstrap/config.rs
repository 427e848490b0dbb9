use std::path::PathBuf;

use tracing::info;

use ag_core::config::AppConfig;
use ag_infra::app_paths::app_data_dir;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "AUTHGATE_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `$AUTHGATE_CONFIG`, or `config.toml` in the app data directory.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(app_data_dir()?.join(CONFIG_FILE_NAME)),
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let path = resolve_config_path()?;
    info!(path = %path.display(), "loading config");
    ag_infra::load_config(&path)
}
