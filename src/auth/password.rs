// Password hashing and verification

use crate::auth::error::AuthError;

/// Cost factor for bcrypt hashing
pub const BCRYPT_COST: u32 = 10;

/// Credential service for hashing and comparing passwords
///
/// bcrypt is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct CredentialService;

impl CredentialService {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password with bcrypt and a random salt
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Compare a plaintext password against a stored bcrypt hash
    pub async fn compare_password(&self, plain: &str, hash: &str) -> Result<bool, AuthError> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }
}
