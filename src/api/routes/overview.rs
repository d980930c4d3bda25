//! Overview Routes
//!
//! - GET /api/v1/overview - Running total and chart-ready series as JSON

use axum::{
    extract::State,
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::OverviewResponse;
use crate::api::error::SiteResult;
use crate::api::state::AppState;

/// GET /api/v1/overview
pub async fn get_overview(State(state): State<Arc<AppState>>) -> SiteResult<Response> {
    let stats = state.composer.load_overview().await?;
    let series = state.composer.chart_series(&stats);

    let body = OverviewResponse {
        total_articles: stats.total_articles,
        months: series.len(),
        chart: series.to_vec(),
    };

    Ok(([(CACHE_CONTROL, "no-store")], Json(body)).into_response())
}
