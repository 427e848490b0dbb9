use std::path::PathBuf;

use anyhow::{Context, Result};

use ag_core::config::AppConfig;

use crate::storage::DEFAULT_STORE_FILE;

const APP_DIR_NAME: &str = "authgate";

/// Application data root directory.
///
/// - macOS: ~/Library/Application Support/authgate
/// - Windows: %APPDATA%\authgate
/// - Linux: $XDG_DATA_HOME/authgate or ~/.local/share/authgate
///
/// Directories are not created here.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join(APP_DIR_NAME))
}

pub fn logs_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

/// Storage file from config, falling back to the data directory.
pub fn resolve_storage_path(config: &AppConfig) -> Result<PathBuf> {
    if config.storage_path.as_os_str().is_empty() {
        Ok(app_data_dir()?.join(DEFAULT_STORE_FILE))
    } else {
        Ok(config.storage_path.clone())
    }
}
