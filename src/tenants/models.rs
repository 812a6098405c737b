use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{trim_owned, Trim};

/// Domain model representing a tenant in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Downtown branch")]
    pub name: String,
    #[schema(example = "12 Main Street")]
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a tenant
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateTenantRequest {
    #[schema(example = "Downtown branch")]
    #[validate(
        custom(
            function = "crate::validation::validate_not_blank",
            message = "Tenant name is required"
        ),
        length(max = 100, message = "Tenant name must not exceed 100 characters")
    )]
    pub name: String,
    #[schema(example = "12 Main Street")]
    #[validate(
        custom(
            function = "crate::validation::validate_not_blank",
            message = "Tenant address is required"
        ),
        length(max = 255, message = "Tenant address must not exceed 255 characters")
    )]
    pub address: String,
}

impl Trim for CreateTenantRequest {
    fn trimmed(self) -> Self {
        Self {
            name: trim_owned(self.name),
            address: trim_owned(self.address),
        }
    }
}
