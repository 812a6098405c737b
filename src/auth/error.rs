// Authentication and authorization error types

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::models::Role;
use crate::error::ApiError;

/// Authentication and authorization error types
#[derive(Debug, Error)]
pub enum AuthError {
    // Domain failures reported to the client as 400
    #[error("Email or password does not match")]
    InvalidCredentials,

    #[error("Email is already exists!")]
    EmailAlreadyExists,

    #[error("User with the token could not find")]
    UserNotFound,

    // Credential failures reported as 401
    #[error("No authorization token was found")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Refresh token has been revoked")]
    RevokedToken,

    /// User lacks the role an endpoint requires
    #[error("Insufficient permissions: required role '{required}', but user has role '{actual}'")]
    InsufficientPermissions { required: Role, actual: Role },

    // Server-side failures reported as 500
    #[error("{0} is not set")]
    KeyNotConfigured(&'static str),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    #[error("Failed to store data in database")]
    StorageError(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials
            | AuthError::EmailAlreadyExists
            | AuthError::UserNotFound => ApiError::BadRequest(error.to_string()),
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::RevokedToken => ApiError::Unauthorized(error.to_string()),
            AuthError::InsufficientPermissions { required, .. } => {
                tracing::warn!("{}", error);
                ApiError::Forbidden(format!("Insufficient permissions: required role '{}'", required))
            }
            AuthError::StorageError(db_error) => {
                tracing::error!("Failed to store data in database: {:?}", db_error);
                ApiError::InternalError("Failed to store data in database".to_string())
            }
            AuthError::DatabaseError(db_error) => ApiError::DatabaseError(db_error),
            AuthError::KeyNotConfigured(_)
            | AuthError::TokenGenerationError(_)
            | AuthError::PasswordHashError(_) => ApiError::InternalError(error.to_string()),
        }
    }
}

/// Extractor rejections render through the same error body as handlers
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
