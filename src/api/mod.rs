//! HTTP Surface
//!
//! Serves the overview page and its supporting endpoints, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Rendered overview page
//!
//! ## Overview
//! - `GET /api/v1/overview` - Running total and chart series as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use kirundi_overview::api::{serve, AppState};
//! use kirundi_overview::config::Config;
//! use kirundi_overview::overview::OverviewClient;
//! use kirundi_overview::page::PageComposer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let client = OverviewClient::new(config.overview.client_config())?;
//!     let composer = PageComposer::new(Arc::new(client), config.page.load_content()?);
//!
//!     serve(AppState::new(composer, config.server.clone())).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{PageFailure, SiteError, SiteResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        .route("/overview", get(routes::overview::get_overview))
        .layer(cors);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::overview_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// CORS for the JSON routes; unparseable origins are skipped with a warning
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), SiteError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Kirundi overview listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SiteError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Kirundi overview shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
