// HTTP handlers for tenant endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::auth::IdResponse;
use crate::error::ApiError;
use crate::tenants::CreateTenantRequest;
use crate::validation::Trim;
use crate::AppState;

/// Create a tenant
/// POST /tenants
#[utoipa::path(
    post,
    path = "/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created", body = IdResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn create_tenant_handler(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateTenantRequest>, ApiError>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let request = request.trimmed();
    request.validate()?;

    let tenant = state
        .tenant_repository
        .create(&request.name, &request.address)
        .await?;

    tracing::info!(id = tenant.id, "Tenant has been created");
    Ok((StatusCode::CREATED, Json(IdResponse { id: tenant.id })))
}
