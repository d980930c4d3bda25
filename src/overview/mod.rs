//! Overview Data
//!
//! Fetches the collection overview (total articles and monthly counts) from
//! the upstream statistics API.
//!
//! ## Architecture
//!
//! - **Types**: `OverviewStats` / `ArticlePoint` and payload validation
//! - **Client**: single-shot HTTP client for the overview endpoint
//! - **OverviewSource**: the seam the page composer loads data through

mod client;
mod types;

pub use client::{OverviewClient, OverviewConfig, OverviewError, OverviewSource};
pub use types::{ArticlePoint, OverviewStats};
