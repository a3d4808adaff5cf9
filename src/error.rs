// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    /// Well-formed refresh token that is not the currently stored one
    /// (never issued, superseded by a later refresh, or expired in store).
    #[error("Refresh token rejected")]
    RefreshRejected,

    #[error("Identity provider error: {0}")]
    Auth(String),

    #[error("LLM API error: {0}")]
    LlmUnavailable(String),

    #[error("Weather API error: {0}")]
    WeatherUnavailable(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::RefreshRejected => (StatusCode::UNAUTHORIZED, "refresh_rejected", None),
            AppError::Auth(msg) => {
                tracing::warn!(error = %msg, "Identity provider failure");
                (StatusCode::UNAUTHORIZED, "auth_failed", None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::LlmUnavailable(msg) => {
                tracing::error!(error = %msg, "LLM API error");
                (StatusCode::BAD_GATEWAY, "llm_error", None)
            }
            AppError::WeatherUnavailable(msg) => {
                tracing::error!(error = %msg, "Weather API error");
                (StatusCode::BAD_GATEWAY, "weather_error", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_class_maps_to_401() {
        for err in [
            AppError::Unauthorized,
            AppError::InvalidToken,
            AppError::RefreshRejected,
            AppError::Auth("kakao down".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_upstream_errors_map_to_502() {
        let response = AppError::LlmUnavailable("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::WeatherUnavailable("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
