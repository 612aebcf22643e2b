//! Error types for facewho-id
//!
//! Domain outcomes such as "No face detected." are not errors: they are
//! 200 responses built by the identify handler. `ApiError` covers failures
//! the service cannot answer for.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ProviderError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream face recognition provider failed (502)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Provider(ref err) => {
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", err.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
