// API error taxonomy -> JSON error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::upstream::UpstreamError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or conflicting query parameters.
    BadRequest(String),
    /// Identifier absent from the device registry.
    NotFound(String),
    /// The server is running without upstream credentials.
    Config,
    /// An upstream call failed; detail stays in the log.
    Upstream,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Config => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server configuration error".to_string(),
            ),
            ApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream service error".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UpstreamError> for ApiError {
    fn from(_: UpstreamError) -> Self {
        ApiError::Upstream
    }
}
