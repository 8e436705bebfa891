use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required input: {}", .0.join(", "))]
    IncompleteInput(Vec<&'static str>),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Document could not be decoded: {0}")]
    DocumentDecode(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External service error: {0}")]
    ExternalService(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(name) => AppError::UnsupportedFormat(name),
            decode @ ExtractError::Decode { .. } => AppError::DocumentDecode(decode.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Failed to read form data: {}", err.body_text()))
    }
}

impl AppError {
    /// Status, machine-readable code and user-facing message for this error.
    /// Server-side failures are logged here and replaced with a generic message.
    pub fn describe(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::IncompleteInput(_) => (
                StatusCode::BAD_REQUEST,
                "INCOMPLETE_INPUT",
                self.to_string(),
            ),
            AppError::UnsupportedFormat(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::DocumentDecode(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_DECODE_ERROR",
                self.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ExternalService(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTERNAL_SERVICE_ERROR",
                    "The evaluation service could not be reached".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.describe();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
