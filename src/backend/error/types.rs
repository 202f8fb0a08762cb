/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `HandlerError` - A request was rejected with an explicit status
 * - `StateError` - The server reached a state it should not be in
 * - `SharedError` - Validation errors from the shared module
 * - `DatabaseError` - sqlx failures
 * - `TokenError` / `PasswordHashError` - JWT and bcrypt failures
 * - `StorageError` - Blob store I/O failures
 *
 * # Status Mapping
 *
 * Validation problems and database constraint violations are 400 and
 * missing rows are 404. Everything else is 500. Rejected tokens are turned
 * into 401 handler errors where they are verified, so a `TokenError` that
 * reaches a response means signing failed.
 */

use axum::http::StatusCode;
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pathmatch::backend::error::BackendError;
///
/// let err = BackendError::not_found("Job not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request rejected with an explicit status (validation, auth, ownership)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Inconsistent server state, e.g. a row vanished mid-request
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation, enum parsing)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// JWT signing failed
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// bcrypt hashing failed
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] bcrypt::BcryptError),

    /// Writing an uploaded blob failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 503 returned by data routes when no database is configured
    pub fn database_unavailable() -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured")
    }

    /// Whether this error is a unique-constraint violation
    ///
    /// Handlers use this to turn duplicate inserts into a friendlier message.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::DatabaseError(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400, except serialization failures (500)
    /// - `DatabaseError` - 404 for a missing row, 400 for constraint
    ///   violations, 500 otherwise
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseError(err) => match err {
                sqlx::Error::RowNotFound => StatusCode::NOT_FOUND,
                sqlx::Error::Database(db) => match db.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                },
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Internal failures get a generic message; their detail only goes to
    /// the log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
            Self::DatabaseError(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            Self::DatabaseError(sqlx::Error::Database(db))
                if self.status_code() == StatusCode::BAD_REQUEST =>
            {
                db.message().to_string()
            }
            Self::DatabaseError(_) => "Internal server error".to_string(),
            Self::TokenError(_) => "Internal server error".to_string(),
            Self::PasswordHashError(_) => "Internal server error".to_string(),
            Self::StorageError(_) => "Failed to store file".to_string(),
        }
    }
}
