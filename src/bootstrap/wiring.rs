//! Dependency wiring
//!
//! Builds the adapters from config and hands them to the use cases. This is
//! the only place that knows about concrete adapter types.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use ag_app::usecases::{ListRoles, LoadProfile};
use ag_app::{LoginFlow, RegistrationFlow, SessionStore};
use ag_core::config::AppConfig;
use ag_core::ports::{AuthApiPort, KeyValueStorePort};
use ag_infra::app_paths::resolve_storage_path;
use ag_infra::{FileKeyValueStore, HttpAuthApi};

/// Everything the presentation layer needs, wired once at startup.
pub struct AppContext {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStorePort>,
    pub api: Arc<dyn AuthApiPort>,
    pub session: Arc<SessionStore>,
    pub login_flow: LoginFlow,
    pub registration_flow: RegistrationFlow,
    pub load_profile: LoadProfile,
    pub list_roles: ListRoles,
}

/// Wire the application with file-backed storage.
pub async fn wire(config: AppConfig) -> anyhow::Result<AppContext> {
    let storage_path =
        resolve_storage_path(&config).context("Failed to resolve storage path")?;
    info!(path = %storage_path.display(), "using file storage");
    wire_with_storage(config, Arc::new(FileKeyValueStore::new(storage_path))).await
}

pub async fn wire_with_storage(
    config: AppConfig,
    storage: Arc<dyn KeyValueStorePort>,
) -> anyhow::Result<AppContext> {
    let api: Arc<dyn AuthApiPort> = Arc::new(
        HttpAuthApi::from_config(&config, storage.clone())
            .context("Failed to create auth API client")?,
    );
    let session = Arc::new(SessionStore::bootstrap(storage.clone()).await);
    let debounce = Duration::from_millis(config.debounce_ms);

    Ok(AppContext {
        login_flow: LoginFlow::new(api.clone(), storage.clone(), session.clone(), debounce),
        registration_flow: RegistrationFlow::new(api.clone(), session.clone(), debounce),
        load_profile: LoadProfile::new(api.clone()),
        list_roles: ListRoles::new(api.clone()),
        config,
        storage,
        api,
        session,
    })
}
