//! Error types for the console cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Console Error Enum ==
/// Unified error type for the cache layer and its HTTP surface.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// No store is registered for the requested entity slug
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure talking to the remote API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-2xx status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Remote API body did not have a recognizable shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<url::ParseError> for ConsoleError {
    fn from(err: url::ParseError) -> Self {
        ConsoleError::Config(format!("invalid URL: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::UnknownEntity(_) => StatusCode::NOT_FOUND,
            ConsoleError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ConsoleError::Http(_) | ConsoleError::Upstream { .. } | ConsoleError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            ConsoleError::Config(_) | ConsoleError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the console cache.
pub type Result<T> = std::result::Result<T, ConsoleError>;
