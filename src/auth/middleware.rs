// Request extractors for authenticated routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{
    cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
    error::AuthError,
    models::Role,
    service::TokenService,
    token::{Claims, JwtService},
};

/// Authenticated user extractor for protected routes
///
/// The access token is read from `Authorization: Bearer <token>` first and
/// from the `accessToken` cookie otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Fails with 403 unless the user holds `required`
    pub fn require_role(&self, required: Role) -> Result<(), AuthError> {
        if self.role != required {
            warn!(
                "Authorization failed: user_id={}, required_role={}, actual_role={}",
                self.user_id, required, self.role
            );
            return Err(AuthError::InsufficientPermissions {
                required,
                actual: self.role,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = access_token_from_headers(&parts.headers).ok_or_else(|| {
            debug!("No access token on request to {}", parts.uri.path());
            AuthError::MissingToken
        })?;

        let jwt = Arc::<JwtService>::from_ref(state);
        let claims = jwt.verify_access_token(&token)?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id()?,
            role: claims.role,
        })
    }
}

/// Admin-only guard built on top of [`AuthenticatedUser`]
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        user.require_role(Role::Admin)?;
        Ok(RequireAdmin(user))
    }
}

/// Refresh token claims whose signature and expiry have been checked.
/// The backing row may already be gone; logout only needs the id.
#[derive(Debug, Clone)]
pub struct ParsedRefreshToken(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for ParsedRefreshToken
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = refresh_token_from_headers(&parts.headers).ok_or(AuthError::MissingToken)?;

        let jwt = Arc::<JwtService>::from_ref(state);
        let claims = jwt.verify_refresh_token(&token)?;
        Ok(ParsedRefreshToken(claims))
    }
}

/// Refresh token claims that are valid and whose row still exists
#[derive(Debug, Clone)]
pub struct RefreshSession(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for RefreshSession
where
    Arc<JwtService>: FromRef<S>,
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ParsedRefreshToken(claims) = ParsedRefreshToken::from_request_parts(parts, state).await?;

        let tokens = Arc::<TokenService>::from_ref(state);
        if tokens.is_revoked(&claims).await? {
            warn!("Revoked refresh token presented for user {}", claims.sub);
            return Err(AuthError::RevokedToken);
        }

        Ok(RefreshSession(claims))
    }
}

/// Bearer header wins over the cookie
pub fn access_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != "undefined");

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    cookie_value(headers, ACCESS_TOKEN_COOKIE)
}

pub fn refresh_token_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, REFRESH_TOKEN_COOKIE)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
