use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use analysis_core::IdentifierError;

/// Request-time failures. Every variant renders as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A query was attempted with no live database handle.
    #[error("database connection is not available")]
    ResourceUnavailable,

    /// The database rejected or failed the statement.
    #[error("{0}")]
    Query(String),

    /// The caller supplied an unusable table name.
    #[error(transparent)]
    InvalidTable(#[from] IdentifierError),

    /// The request body could not be read as the expected form.
    #[error("{}", .0.body_text())]
    Form(#[from] FormRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ResourceUnavailable | Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidTable(_) => StatusCode::BAD_REQUEST,
            Self::Form(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        detail_error(self.status(), self.to_string())
    }
}

pub fn detail_error(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "detail": detail.into() }))).into_response()
}
