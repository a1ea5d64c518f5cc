//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Error returned by a route handler.
///
/// Every failure maps to `500 Internal Server Error`; clients distinguish
/// causes by the message only.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] garage_core::Error);

impl ApiError {
    /// Returns the underlying store error.
    pub fn inner(&self) -> &garage_core::Error {
        &self.0
    }
}

/// Body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}
