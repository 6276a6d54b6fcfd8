use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::ai::AiError;

/// Errors a handler can surface to the client. Everything is terminal for
/// the current request; nothing is retried.
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    Unauthorized(&'static str),
    NotFound(&'static str),
    RateLimited,
    QuotaExceeded,
    Upstream,
    EmptyResponse,
    /// Carries a prefix of the model's reply so the client can show what
    /// came back instead of JSON.
    ParseFailure { raw: String },
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, json!({ "error": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "Rate limit exceeded. Please try again in a moment." }),
            ),
            ApiError::QuotaExceeded => (
                StatusCode::PAYMENT_REQUIRED,
                json!({ "error": "AI usage limit reached. Please add credits." }),
            ),
            ApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "AI analysis failed" }),
            ),
            ApiError::EmptyResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "No response from AI" }),
            ),
            ApiError::ParseFailure { raw } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to parse AI response", "raw": raw }),
            ),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::RateLimited => ApiError::RateLimited,
            AiError::QuotaExceeded => ApiError::QuotaExceeded,
            AiError::Upstream { status, body } => {
                tracing::error!(status, body = %body, "AI gateway error");
                ApiError::Upstream
            }
            AiError::Transport(err) => {
                tracing::error!(error = %err, "AI gateway request failed");
                ApiError::Upstream
            }
            AiError::EmptyResponse => ApiError::EmptyResponse,
            AiError::ParseFailure { raw } => {
                tracing::error!(raw = %raw, "failed to parse AI response as JSON");
                ApiError::ParseFailure { raw }
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database error");
        ApiError::Internal("Database error")
    }
}
