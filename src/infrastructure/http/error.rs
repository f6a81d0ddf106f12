//! API error type and its mapping from service errors
//!
//! Every failure reaches the client as `{"error": ..., "details"?: ...}`.
//! Vendor response bodies stay in the logs.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::application::services::character_generation_service::GenerationStage;
use crate::application::services::{
    GenerationError, LessonError, NotificationError, SignupError, TokenError,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {error}")]
    Internal {
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn internal(error: impl Into<String>) -> Self {
        Self::Internal {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Internal {
                error,
                details: None,
            } => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": error })),
            ApiError::Internal {
                error,
                details: Some(details),
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": error, "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Malformed or wrongly typed bodies are client errors like any other
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidInput(msg) => Self::BadRequest(msg),
            GenerationError::NotConfigured => Self::internal(err.to_string()),
            // Animation only surfaces as an error on the existing-character path
            GenerationError::Stage {
                stage: GenerationStage::Animate,
                detail,
            } => Self::with_details("Video generation failed", detail),
            GenerationError::Stage { detail, .. } => {
                Self::with_details("Generation failed", detail)
            }
        }
    }
}

impl From<LessonError> for ApiError {
    fn from(err: LessonError) -> Self {
        match err {
            LessonError::InvalidInput(msg) => Self::BadRequest(msg),
            LessonError::NotConfigured => Self::internal(err.to_string()),
            LessonError::Stage(stage) => {
                Self::with_details("Video generation failed", stage.failure_detail())
            }
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::InvalidInput(msg) => Self::BadRequest(msg),
            NotificationError::NotConfigured => Self::internal(err.to_string()),
            NotificationError::Delivery(_) => Self::internal("Failed to send email"),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::InvalidInput(msg) => Self::BadRequest(msg),
            SignupError::Storage(_) => Self::internal("Failed to record signup"),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidAssistant => Self::BadRequest(err.to_string()),
            TokenError::PublicKeyMissing | TokenError::AssistantIdMissing(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
