//! Kirundi Overview Server
//!
//! Run with: cargo run --bin kirundi-overview
//!
//! # Configuration
//!
//! Read from `config.toml` (see `kirundi-overview-cli config`) with
//! environment overrides:
//! - `OVERVIEW_API_URL`: Overview endpoint (required)
//! - `KIRUNDI_HOST`: Host to bind to (default: 0.0.0.0)
//! - `KIRUNDI_PORT`: Port to listen on (default: 3000)
//! - `KIRUNDI_CONTRIBUTORS_FILE`: Contributors TOML file (default: bundled list)
//! - `KIRUNDI_LOG_LEVEL` / `KIRUNDI_LOG_FORMAT`: Logging (default: info / pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use kirundi_overview::api::{serve, AppState};
use kirundi_overview::config::Config;
use kirundi_overview::logging;
use kirundi_overview::overview::OverviewClient;
use kirundi_overview::page::PageComposer;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    logging::init(&config.logging);

    tracing::info!("Starting Kirundi overview server v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    let client = OverviewClient::new(config.overview.client_config())
        .context("Failed to create overview client")?;
    tracing::info!("Overview endpoint: {}", client.endpoint());

    let content = config
        .page
        .load_content()
        .context("Failed to load page content")?;
    tracing::info!("Loaded {} contributors", content.contributors.len());

    let composer = PageComposer::new(Arc::new(client), content);
    let state = AppState::new(composer, config.server.clone());

    tracing::info!("Starting server on {}", config.server.addr());
    serve(state).await?;

    tracing::info!("Kirundi overview server stopped");
    Ok(())
}
