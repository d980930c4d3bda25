//! Error Types
//!
//! Errors surfaced by the HTTP layer and their conversion to responses:
//! JSON bodies for `/api` routes, an HTML error page for the overview page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::overview::OverviewError;
use crate::page::PageError;

/// Site error types
#[derive(Error, Debug)]
pub enum SiteError {
    /// Loading overview data failed
    #[error(transparent)]
    Overview(#[from] OverviewError),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PageError> for SiteError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Overview(e) => SiteError::Overview(e),
            PageError::Template(e) => SiteError::Template(e),
        }
    }
}

impl SiteError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            SiteError::Overview(OverviewError::FetchFailure { .. }) => {
                (StatusCode::BAD_GATEWAY, "FETCH_FAILURE")
            }
            SiteError::Overview(OverviewError::MalformedPayload(_)) => {
                (StatusCode::BAD_GATEWAY, "MALFORMED_PAYLOAD")
            }
            SiteError::Overview(OverviewError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
            }
            SiteError::Overview(OverviewError::InvalidEndpoint(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_ENDPOINT")
            }
            SiteError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
            SiteError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            SiteError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// Log the error under a fresh request id and return the id
    fn log(&self, code: &str) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Request failed"
        );

        request_id
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = self.log(code);

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate<'a> {
    status: u16,
    message: &'a str,
    request_id: &'a str,
}

/// Whole-page failure, rendered as an HTML error page
#[derive(Debug)]
pub struct PageFailure(pub SiteError);

impl From<PageError> for PageFailure {
    fn from(err: PageError) -> Self {
        PageFailure(err.into())
    }
}

impl From<OverviewError> for PageFailure {
    fn from(err: OverviewError) -> Self {
        PageFailure(err.into())
    }
}

impl IntoResponse for PageFailure {
    fn into_response(self) -> Response {
        let (status, code) = self.0.status_and_code();
        let request_id = self.0.log(code);
        let message = self.0.to_string();

        let page = ErrorPageTemplate {
            status: status.as_u16(),
            message: &message,
            request_id: &request_id,
        }
        .render()
        .unwrap_or_else(|_| format!("{} (request {})", message, request_id));

        (status, Html(page)).into_response()
    }
}

/// Result type for JSON handlers
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let err = SiteError::from(OverviewError::FetchFailure { status: 404 });
        assert_eq!(err.status_and_code(), (StatusCode::BAD_GATEWAY, "FETCH_FAILURE"));

        let err = SiteError::from(OverviewError::MalformedPayload("x".into()));
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_page_error_conversion() {
        let err = SiteError::from(PageError::Overview(OverviewError::FetchFailure {
            status: 500,
        }));
        assert_eq!(err.to_string(), "failed to fetch overview data");
    }

    #[test]
    fn test_page_failure_renders_html() {
        let failure = PageFailure::from(OverviewError::FetchFailure { status: 500 });
        let response = failure.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
