//! Mapping of failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use super::types::ErrorResponse;
use crate::agents::AgentError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was understood but is missing something it needs.
    #[error("{0}")]
    BadRequest(String),

    /// The agent call failed. Details are logged, not returned.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        Self::BadRequest(format!("Missing required field: {}", field))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Agent(err) => {
                tracing::error!(
                    kind = %err.kind(),
                    transient = err.is_transient(),
                    "Agent call failed: {}",
                    err
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
