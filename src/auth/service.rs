// Authentication services - business logic layer

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{NewUser, RefreshToken, User},
    password::CredentialService,
    repository::{RefreshTokenRepository, UserRepository},
    token::{Claims, JwtService, TokenPayload, REFRESH_TOKEN_TTL_SECS},
};

/// User service: account creation and lookups
#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
    credentials: CredentialService,
}

impl UserService {
    /// Create a new UserService
    pub fn new(repository: UserRepository, credentials: CredentialService) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Create a user
    ///
    /// This method:
    /// 1. Rejects an email that is already registered
    /// 2. Hashes the password
    /// 3. Inserts the row with the role chosen by the caller
    pub async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
        if self.repository.email_exists(&new_user.email).await? {
            tracing::debug!("Email already registered: {}", new_user.email);
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.credentials.hash_password(&new_user.password).await?;

        self.repository
            .create(
                &new_user.first_name,
                &new_user.last_name,
                &new_user.email,
                &password_hash,
                new_user.role,
            )
            .await
    }

    /// Find a user by email; the returned row carries the password hash
    pub async fn find_by_email_with_password(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.repository.find_by_email(email).await
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        self.repository.find_by_id(id).await
    }
}

/// Token service: issues tokens and manages the refresh_tokens rows behind them
pub struct TokenService {
    jwt: Arc<JwtService>,
    repository: RefreshTokenRepository,
}

impl TokenService {
    /// Create a new TokenService
    pub fn new(jwt: Arc<JwtService>, repository: RefreshTokenRepository) -> Self {
        Self { jwt, repository }
    }

    /// Sign a one-hour access token
    pub fn generate_access_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        self.jwt.generate_access_token(payload)
    }

    /// Sign a one-year refresh token bound to a persisted row
    pub fn generate_refresh_token(
        &self,
        payload: &TokenPayload,
        token: &RefreshToken,
    ) -> Result<String, AuthError> {
        self.jwt.generate_refresh_token(payload, token.id)
    }

    /// Insert a refresh token row expiring one year from now
    pub async fn persist_refresh_token(&self, user: &User) -> Result<RefreshToken, AuthError> {
        let expires_at = Utc::now() + Duration::seconds(REFRESH_TOKEN_TTL_SECS);
        self.repository.create(user.id, expires_at).await
    }

    /// Remove a refresh token row
    pub async fn delete_refresh_token(&self, id: i32) -> Result<(), AuthError> {
        let deleted = self.repository.delete(id).await?;
        if deleted == 0 {
            tracing::debug!("Refresh token {} was already gone", id);
        }
        Ok(())
    }

    /// Delete the row behind a refresh token that is being rotated.
    /// Only one caller can win the delete; everyone else sees a revoked token.
    pub async fn consume_refresh_token(&self, id: i32) -> Result<(), AuthError> {
        if self.repository.delete(id).await? == 0 {
            tracing::warn!("Refresh token {} was consumed concurrently", id);
            return Err(AuthError::RevokedToken);
        }
        Ok(())
    }

    /// A refresh token is revoked once its row no longer exists
    pub async fn is_revoked(&self, claims: &Claims) -> Result<bool, AuthError> {
        let token_id = claims.token_id()?;
        let user_id = claims.user_id()?;

        let row = self.repository.find_for_user(token_id, user_id).await?;
        Ok(row.is_none())
    }
}
