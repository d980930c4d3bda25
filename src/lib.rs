//! # Kirundi Overview
//!
//! Server-rendered progress page for the Kirundi NLP text collection
//! initiative: mission statement, objectives, a line chart of monthly
//! article counts fetched from the statistics API, and the contributor list.
//!
//! ## Modules
//!
//! - [`overview`]: Overview data model and HTTP client
//! - [`chart`]: Series transform, memo cache, SVG line chart, animated counter
//! - [`page`]: Static content and the page composer
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kirundi_overview::overview::{OverviewClient, OverviewConfig};
//! use kirundi_overview::page::{PageComposer, PageContent};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OverviewClient::new(OverviewConfig::new("https://api.example.org/overview"))?;
//!     let composer = PageComposer::new(Arc::new(client), PageContent::bundled()?);
//!
//!     let html = composer.render().await?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod logging;
pub mod overview;
pub mod page;

// Re-export top-level types for convenience
pub use overview::{
    ArticlePoint, OverviewClient, OverviewConfig, OverviewError, OverviewSource, OverviewStats,
};

pub use chart::{transform, ChartPoint, CountUp, LineChart, SeriesCache, TrendChart};

pub use page::{Contributor, PageComposer, PageContent, PageError};

pub use api::{build_router, serve, AppState, SiteError};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig, ServerConfig};
