//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.
//!
//! Absence of a key is never an error anywhere in the engine: lookups signal
//! it with `Option::None` and deletes of missing keys succeed. The only
//! failures the engine produces are backend storage failures and, at the HTTP
//! edge, request validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store could not be reached or failed mid-operation.
    /// Carries the driver's message unmodified; no retry is attempted.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Invalid request data (rejected at the HTTP edge, never by backends)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        CacheError::StorageUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::StorageUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
