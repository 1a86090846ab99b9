use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The completion text for a timeline was not a JSON array of valid entries.
    #[error("Timeline parse error: {message}")]
    TimelineParse { message: String, raw: String },

    /// The completion text for a template proposal was unusable.
    #[error("Template parse error: {message}")]
    TemplateParse { message: String, raw: String },

    #[error("Schedule violation: {0}")]
    ScheduleViolation(String),

    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A multi-row write failed and was rolled back.
    #[error("Creation error: {0}")]
    Creation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::ServiceUnavailable(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::TimelineParse { .. } => (StatusCode::BAD_REQUEST, "TIMELINE_PARSE_ERROR"),
            AppError::TemplateParse { .. } => (StatusCode::BAD_REQUEST, "TEMPLATE_PARSE_ERROR"),
            AppError::ScheduleViolation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "SCHEDULE_VIOLATION")
            }
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            AppError::Creation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CREATION_ERROR"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::ScheduleViolation(msg) => msg.clone(),
            AppError::TimelineParse { message, .. } | AppError::TemplateParse { message, .. } => {
                tracing::warn!("{self}");
                message.clone()
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Completion service error: {msg}");
                msg.clone()
            }
            AppError::Creation(msg) => {
                tracing::error!("Creation error: {msg}");
                msg.clone()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = match &self {
            AppError::TimelineParse { raw, .. } | AppError::TemplateParse { raw, .. } => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "raw_response": raw
                }
            }),
            _ => json!({
                "error": {
                    "code": code,
                    "message": message
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}
