use anyhow::Context;
use tracing::{error, info};

use ag_core::session::Screen;
use authgate_lib::bootstrap::{init_tracing_subscriber, load_app_config, wire};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing_subscriber().context("Failed to initialize tracing")?;

    let config = load_app_config()?;
    info!(api = %config.api_base_url, debounce_ms = config.debounce_ms, "config loaded");

    let context = wire(config).await?;
    let screen = context.session.current_screen().await;
    info!(?screen, "initial screen");

    if screen == Screen::Home {
        match context.load_profile.execute().await {
            Ok(profile) => info!(panel = ?profile.home_panel(), "profile loaded"),
            Err(err) => error!(error = %err, "failed to load profile"),
        }
    }

    Ok(())
}
