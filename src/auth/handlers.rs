// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::{
    cookies,
    error::AuthError,
    middleware::{AuthenticatedUser, ParsedRefreshToken, RefreshSession},
    models::{IdResponse, LoginRequest, NewUser, RegisterRequest, Role, User, UserResponse},
    token::TokenPayload,
};
use crate::error::ApiError;
use crate::validation::Trim;
use crate::AppState;

/// Issue an access/refresh pair for `user` and attach both cookies
async fn start_session(
    state: &AppState,
    jar: CookieJar,
    payload: &TokenPayload,
    user: &User,
) -> Result<CookieJar, AuthError> {
    let access_token = state.token_service.generate_access_token(payload)?;

    let stored = state.token_service.persist_refresh_token(user).await?;
    let refresh_token = state.token_service.generate_refresh_token(payload, &stored)?;

    Ok(cookies::set_session_cookies(
        jar,
        access_token,
        refresh_token,
        &state.config.cookie_domain,
    ))
}

/// Register a new customer
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, session cookies set", body = IdResponse),
        (status = 400, description = "Validation failed or email already registered", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, CookieJar, Json<IdResponse>), ApiError> {
    let request = request.trimmed();
    request.validate()?;

    tracing::debug!(
        first_name = %request.first_name,
        last_name = %request.last_name,
        email = %request.email,
        password = "*****",
        "New request to register a user"
    );

    let user = state
        .user_service
        .create(NewUser::from_request(request, Role::Customer))
        .await?;
    tracing::info!(id = user.id, "User has been registered");

    let payload = TokenPayload::new(user.id, user.role);
    let jar = start_session(&state, jar, &payload, &user).await?;

    Ok((StatusCode::CREATED, jar, Json(IdResponse { id: user.id })))
}

/// Log a user in
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookies set", body = IdResponse),
        (status = 400, description = "Validation failed or credentials do not match", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(CookieJar, Json<IdResponse>), ApiError> {
    let request = request.trimmed();
    request.validate()?;

    tracing::debug!(email = %request.email, password = "****", "New request to login a user");

    // Unknown email and wrong password are indistinguishable to the client
    let user = state
        .user_service
        .find_by_email_with_password(&request.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_match = state
        .credential_service
        .compare_password(&request.password, &user.password)
        .await?;
    if !password_match {
        return Err(AuthError::InvalidCredentials.into());
    }

    let payload = TokenPayload::new(user.id, user.role);
    let jar = start_session(&state, jar, &payload, &user).await?;

    tracing::info!(id = user.id, "User has been logged in");
    Ok((jar, Json(IdResponse { id: user.id })))
}

/// Current user profile
/// GET /auth/self
#[utoipa::path(
    get,
    path = "/auth/self",
    responses(
        (status = 200, description = "Authenticated user without password", body = UserResponse),
        (status = 400, description = "User no longer exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn self_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let found = state
        .user_service
        .find_by_id(user.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(found.into()))
}

/// Rotate the session: old row deleted, new refresh row, new access token
/// POST /auth/refresh
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Tokens rotated, session cookies set", body = IdResponse),
        (status = 400, description = "User behind the token no longer exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing, invalid or revoked refresh token", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_handler(
    State(state): State<AppState>,
    RefreshSession(claims): RefreshSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<IdResponse>), ApiError> {
    let payload = claims.payload();
    let access_token = state.token_service.generate_access_token(&payload)?;

    let user = state
        .user_service
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    state
        .token_service
        .consume_refresh_token(claims.token_id()?)
        .await?;
    let stored = state.token_service.persist_refresh_token(&user).await?;

    let refresh_token = state.token_service.generate_refresh_token(&payload, &stored)?;
    let jar = cookies::set_session_cookies(
        jar,
        access_token,
        refresh_token,
        &state.config.cookie_domain,
    );

    tracing::info!(id = user.id, "Session has been refreshed");
    Ok((jar, Json(IdResponse { id: user.id })))
}

/// Log out: drop the refresh row and clear both cookies
/// POST /auth/logout
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logged out, cookies cleared"),
        (status = 401, description = "Missing or invalid tokens", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ParsedRefreshToken(claims): ParsedRefreshToken,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let token_id = claims.token_id()?;
    state.token_service.delete_refresh_token(token_id).await?;
    tracing::info!(id = token_id, "Refresh token has been deleted");
    tracing::info!(id = user.user_id, "User has been logged out");

    let jar = cookies::clear_session_cookies(jar, &state.config.cookie_domain);
    Ok((jar, Json(json!({}))))
}
