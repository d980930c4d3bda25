//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use serde::Serialize;

use crate::chart::ChartPoint;

/// Overview response: running total plus the chart-ready series
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_articles: u64,
    pub months: usize,
    pub chart: Vec<ChartPoint>,
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" or "unreachable"
    pub upstream: String,
    /// Where overview data is fetched from
    pub source: String,
    pub uptime_seconds: u64,
    pub version: String,
}
