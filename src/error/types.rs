/**
 * API Error Types
 *
 * This module defines the error taxonomy used by HTTP handlers:
 * BadRequest, Unauthorized, Conflict, NotFound, plus the internal
 * variants that map to 500. Every error carries the message that ends
 * up in the JSON response body.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors returned by HTTP handlers and the layers beneath them.
///
/// Each variant maps to a fixed HTTP status via [`ApiError::status_code`].
/// Store-level failures are wrapped as `Database` rather than classified
/// by message text, so routing to a status never depends on string matching.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, schema violation
    #[error("{0}")]
    BadRequest(String),

    /// Missing/invalid/expired token, bad credentials, unverified account
    #[error("{0}")]
    Unauthorized(String),

    /// Duplicate email on signup
    #[error("{0}")]
    Conflict(String),

    /// Unknown id or verification token
    #[error("{0}")]
    NotFound(String),

    /// Store-layer failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else that should surface as a 500
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the JSON response body.
    ///
    /// 5xx details never leave the process; the caller logs them and the
    /// client sees a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Conflict(m)
            | Self::NotFound(m) => m.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("io error: {err}"))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {err}"))
    }
}
