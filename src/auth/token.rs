// JWT token generation and validation

use crate::auth::{error::AuthError, models::Role};
use crate::config::Config;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Issuer written into and required from every token
pub const ISSUER: &str = "auth-service";

/// Access tokens live for one hour
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh tokens live for one year
pub const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 365;

/// Identity carried by both token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub sub: String,
    pub role: Role,
}

impl TokenPayload {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self {
            sub: user_id.to_string(),
            role,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: Role,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Id of the backing refresh_tokens row, refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Numeric user id from `sub`
    pub fn user_id(&self) -> Result<i32, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }

    /// Numeric refresh-token row id from `jti`
    pub fn token_id(&self) -> Result<i32, AuthError> {
        self.jti
            .as_deref()
            .and_then(|jti| jti.parse().ok())
            .ok_or(AuthError::InvalidToken)
    }

    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            sub: self.sub.clone(),
            role: self.role,
        }
    }
}

/// Signs and verifies tokens
///
/// Access tokens use RS256 with an RSA key pair, refresh tokens use HS256 with
/// a shared secret. Either RSA half may be absent; the matching operation then
/// fails with `KeyNotConfigured`.
pub struct JwtService {
    access_signing_key: Option<EncodingKey>,
    access_verifying_key: Option<DecodingKey>,
    refresh_signing_key: EncodingKey,
    refresh_verifying_key: DecodingKey,
}

impl JwtService {
    /// Create a JwtService from PEM encoded RSA keys and the refresh secret
    pub fn new(
        private_key_pem: Option<&str>,
        public_key_pem: Option<&str>,
        refresh_secret: &str,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        let access_signing_key = private_key_pem
            .map(|pem| EncodingKey::from_rsa_pem(pem.as_bytes()))
            .transpose()?;
        let access_verifying_key = public_key_pem
            .map(|pem| DecodingKey::from_rsa_pem(pem.as_bytes()))
            .transpose()?;

        Ok(Self {
            access_signing_key,
            access_verifying_key,
            refresh_signing_key: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_verifying_key: DecodingKey::from_secret(refresh_secret.as_bytes()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, jsonwebtoken::errors::Error> {
        Self::new(
            config.private_key.as_deref(),
            config.public_key.as_deref(),
            &config.refresh_token_secret,
        )
    }

    /// Generate an access token (1 hour, RS256)
    pub fn generate_access_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        let key = self
            .access_signing_key
            .as_ref()
            .ok_or(AuthError::KeyNotConfigured("PRIVATE_KEY"))?;

        let claims = Self::claims(payload, ACCESS_TOKEN_TTL_SECS, None);

        encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Generate a refresh token (1 year, HS256) bound to a refresh_tokens row
    pub fn generate_refresh_token(
        &self,
        payload: &TokenPayload,
        token_id: i32,
    ) -> Result<String, AuthError> {
        let claims = Self::claims(payload, REFRESH_TOKEN_TTL_SECS, Some(token_id.to_string()));

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.refresh_signing_key,
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self
            .access_verifying_key
            .as_ref()
            .ok_or(AuthError::KeyNotConfigured("PUBLIC_KEY"))?;

        Self::verify(token, key, Algorithm::RS256)
    }

    /// Validate a refresh token; the claims must carry a `jti`
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = Self::verify(token, &self.refresh_verifying_key, Algorithm::HS256)?;
        claims.token_id()?;
        Ok(claims)
    }

    fn claims(payload: &TokenPayload, ttl_secs: i64, jti: Option<String>) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: payload.sub.clone(),
            role: payload.role,
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + ttl_secs,
            jti,
        }
    }

    fn verify(token: &str, key: &DecodingKey, algorithm: Algorithm) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[ISSUER]);

        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}
