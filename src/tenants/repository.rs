use sqlx::PgPool;

use crate::tenants::Tenant;

/// Repository for database operations on tenants
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Create a new TenantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a tenant
    pub async fn create(&self, name: &str, address: &str) -> Result<Tenant, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, address)
            VALUES ($1, $2)
            RETURNING id, name, address, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }
}
