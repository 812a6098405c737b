// Error handling module for the auth service
// Provides the central error type and its conversion into the uniform JSON error body

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

/// Main error type for the API
/// All handlers return Result<T, ApiError>
///
/// Each variant maps to a specific HTTP status code. Every variant renders to
/// the same body shape: `{ "errors": [{ "type", "msg", "path", "location" }] }`.
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failures, one entry per failing field
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Known domain failures (duplicate email, bad credentials, missing user)
    /// Maps to HTTP 400 Bad Request
    BadRequest(String),

    /// Missing, malformed, expired or revoked credentials
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Authenticated but lacking the required role
    /// Maps to HTTP 403 Forbidden
    Forbidden(String),

    /// Database operation errors
    /// Maps to HTTP 500, details stay in the logs
    DatabaseError(sqlx::Error),

    /// Configuration or other unexpected failures
    /// Maps to HTTP 500
    InternalError(String),
}

/// A single entry of the error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// "field" for validation failures, otherwise the error name
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl ErrorDetail {
    fn named(kind: &str, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            msg: msg.into(),
            path: String::new(),
            location: String::new(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Logging level follows severity: error! for 500s, warn! for auth
    /// failures, debug! for expected client errors.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let errors = match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                field_errors(errors)
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                vec![ErrorDetail::named("BadRequestError", message.clone())]
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                vec![ErrorDetail::named("UnauthorizedError", message.clone())]
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden access attempt: {}", message);
                vec![ErrorDetail::named("ForbiddenError", message.clone())]
            }
            ApiError::DatabaseError(db_error) => {
                // Full error is logged, never sent to the client
                error!("Database error: {:?}", db_error);
                vec![ErrorDetail::named(
                    "InternalServerError",
                    "A database error occurred",
                )]
            }
            ApiError::InternalError(message) => {
                error!("Internal error: {}", message);
                vec![ErrorDetail::named("InternalServerError", message.clone())]
            }
        };

        (self.status_code(), ErrorResponse { errors })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flatten validator output into body entries, ordered by field name
fn field_errors(errors: &validator::ValidationErrors) -> Vec<ErrorDetail> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let path = camel_case(field);
            field_errors.iter().map(move |err| ErrorDetail {
                kind: "field".to_string(),
                msg: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code)),
                path: path.clone(),
                location: "body".to_string(),
            })
        })
        .collect()
}

/// Request bodies use camelCase keys while validator reports Rust field names
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert sqlx errors to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

/// Convert validator errors to ApiError
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

/// Malformed or non-JSON bodies are client errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
