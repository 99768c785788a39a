use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::generation::GenerationError;

/// One failing input field, named as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors a handler can return. Generation and persistence failures both
/// collapse to the same generic 500 body; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request data")]
    Validation(Vec<FieldError>),

    #[error("meal plan not found")]
    NotFound,

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("persistence failed: {0:#}")]
    Persistence(anyhow::Error),

    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

pub const GENERATION_FAILED: &str = "Failed to generate meal plan";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request data", "details": details }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Meal plan not found" }),
            ),
            ApiError::Generation(_) | ApiError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": GENERATION_FAILED }),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
