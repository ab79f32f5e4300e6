//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::services::RelayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Upstream API failure, message embeds the upstream body text
    #[error("{0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request_error",
            AppError::Upstream(_) => "upstream_error",
            AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => "api_error",
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            // Keep the full display form so the upstream body text survives
            RelayError::Upstream { .. } => AppError::Upstream(err.to_string()),
            RelayError::Request(err) => AppError::HttpClient(err),
            RelayError::Decode(_) | RelayError::Transport(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log error
        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        let error_response = ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Validation("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("test".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AppError::Validation("test".to_string()).error_type(),
            "invalid_request_error"
        );
        assert_eq!(
            AppError::Upstream("test".to_string()).error_type(),
            "upstream_error"
        );
        assert_eq!(
            AppError::Internal("test".to_string()).error_type(),
            "api_error"
        );
    }

    #[test]
    fn test_upstream_relay_error_keeps_body_text() {
        let relay_err = RelayError::Upstream {
            status: 401,
            message: "invalid api key".to_string(),
        };
        let app_err = AppError::from(relay_err);

        assert_eq!(app_err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(app_err.to_string().contains("invalid api key"));
        assert!(app_err
            .to_string()
            .contains("OpenAI API returned an error:"));
    }

    #[test]
    fn test_error_response_serialization() {
        let app_err = AppError::Validation("inputCode cannot be empty".to_string());
        let response = ErrorResponse {
            error_type: app_err.error_type().to_string(),
            message: app_err.to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "invalid_request_error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("inputCode cannot be empty"));
    }
}
