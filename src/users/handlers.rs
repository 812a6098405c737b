// HTTP handlers for user management

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::auth::{
    models::{IdResponse, NewUser, RegisterRequest, Role},
    RequireAdmin,
};
use crate::error::ApiError;
use crate::validation::Trim;
use crate::AppState;

/// Body for creating a user; same shape and rules as registration
pub type CreateUserRequest = RegisterRequest;

/// Create a manager account
/// POST /users
///
/// Only admins may call this. No session is started for the new account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Manager created", body = IdResponse),
        (status = 400, description = "Validation failed or email already registered", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user_handler(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Json(request), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let request = request.trimmed();
    request.validate()?;

    let user = state
        .user_service
        .create(NewUser::from_request(request, Role::Manager))
        .await?;

    tracing::info!(id = user.id, created_by = admin.user_id, "Manager has been created");
    Ok((StatusCode::CREATED, Json(IdResponse { id: user.id })))
}
