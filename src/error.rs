//! Error types for the call-history cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache facade and its backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (only raised by the HTTP layer; fetch reports absence as `None`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data, or a value the backend refused to store
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// The backing store failed or is unreachable
    #[error("Backend error: {0}")]
    Backend(String),

    /// Writing a report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::WrongType(_) | CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Backend(_) | CacheError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
