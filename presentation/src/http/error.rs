//! API error type for the completion server.
//!
//! Every failure is reported to clients as the same generic 500 body; the
//! underlying cause only goes to the log.

use assistant_application::ProxyCompletionError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// The only error text ever returned to clients.
pub const GENERIC_FAILURE: &str = "An error occurred while processing your request";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Completion(#[from] ProxyCompletionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Chat request failed: {}", self);
        let body = ErrorBody {
            error: GENERIC_FAILURE.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
