use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Admin API did not answer in time".to_string(),
            ),
            AppError::Upstream(e) => {
                error!("upstream error: {}", e);
                (StatusCode::BAD_GATEWAY, "Admin API is unreachable".to_string())
            }
            AppError::UpstreamStatus { status, body } => {
                error!("upstream answered {}: {}", status, body);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Admin API answered with status {}", status),
                )
            }
            AppError::Decode(msg) => {
                error!("decode error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Admin API sent an unexpected payload".to_string())
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
