// Database repositories for users and refresh tokens

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{RefreshToken, Role, User},
};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user whose password is already hashed
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, password, role, created_at, updated_at
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A concurrent registration can pass the existence check and lose here
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::StorageError(e)
        })
    }

    /// Find a user by email, including the password hash
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email exists
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }
}

/// Refresh token repository
#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new RefreshTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a refresh token row for a user
    pub async fn create(
        &self,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, expires_at)
            VALUES ($1, $2)
            RETURNING id, user_id, expires_at, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    /// Delete a refresh token row, returning how many rows went away
    pub async fn delete(&self, id: i32) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Find the row backing a refresh token, scoped to its owner
    pub async fn find_for_user(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<RefreshToken>, AuthError> {
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT id, user_id, expires_at, created_at, updated_at
            FROM refresh_tokens
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}
