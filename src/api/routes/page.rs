//! Page Route
//!
//! - GET / - The rendered overview page

use axum::{
    extract::State,
    http::header::CACHE_CONTROL,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::PageFailure;
use crate::api::state::AppState;

/// GET /
///
/// Fetches fresh overview data and renders the full page. Any failure
/// replaces the whole page with the error page.
pub async fn overview_page(State(state): State<Arc<AppState>>) -> Result<Response, PageFailure> {
    let html = state.composer.render().await?;

    Ok(([(CACHE_CONTROL, "no-store")], Html(html)).into_response())
}
