// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{trim_owned, Trim};

/// Coarse authorization tag carried in token claims
/// Self-registered accounts are always customers
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Manager,
    Admin,
}

impl Role {
    /// Convert role to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User database model, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response model (excludes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Data needed to insert a user; `password` is still plaintext here
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn from_request(request: RegisterRequest, role: Role) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            role,
        }
    }
}

/// Refresh token database model
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i32,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request DTO
/// Missing keys deserialize as empty strings so they fail validation with a 400
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "Jane")]
    #[validate(
        custom(
            function = "crate::validation::validate_not_blank",
            message = "FirstName is required"
        ),
        length(max = 255, message = "firstName must not exceed 255 characters")
    )]
    pub first_name: String,
    #[schema(example = "Doe")]
    #[validate(
        custom(
            function = "crate::validation::validate_not_blank",
            message = "lastName is required"
        ),
        length(max = 255, message = "lastName must not exceed 255 characters")
    )]
    pub last_name: String,
    #[schema(example = "jane@example.com")]
    #[validate(
        custom(
            function = "crate::validation::validate_not_blank",
            message = "Email is required!"
        ),
        email(message = "Email should be a valid email"),
        length(max = 255, message = "Email must not exceed 255 characters")
    )]
    pub email: String,
    #[schema(example = "secret")]
    #[validate(custom(
        function = "crate::validation::validate_not_blank",
        message = "Password is required"
    ))]
    pub password: String,
}

impl Trim for RegisterRequest {
    fn trimmed(self) -> Self {
        Self {
            first_name: trim_owned(self.first_name),
            last_name: trim_owned(self.last_name),
            email: trim_owned(self.email),
            password: trim_owned(self.password),
        }
    }
}

/// Login request DTO
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "jane@example.com")]
    #[validate(custom(
        function = "crate::validation::validate_not_blank",
        message = "Email is required!"
    ))]
    pub email: String,
    #[schema(example = "secret")]
    #[validate(custom(
        function = "crate::validation::validate_not_blank",
        message = "Password is required"
    ))]
    pub password: String,
}

impl Trim for LoginRequest {
    fn trimmed(self) -> Self {
        Self {
            email: trim_owned(self.email),
            password: trim_owned(self.password),
        }
    }
}

/// Body returned by endpoints that create or authenticate an entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    #[schema(example = 1)]
    pub id: i32,
}
