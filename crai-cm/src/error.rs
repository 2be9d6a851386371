//! Error types for crai-cm
//!
//! Validation problems surface as 400; everything that goes wrong inside
//! the pipeline surfaces as 500. A failed submission persists nothing.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::analyzer::AnalyzeError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or too-short input (400)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Analysis pipeline failure (500)
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalyzeError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::Analysis(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
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
