pub mod handlers;
pub mod models;
pub mod repository;

use axum::{routing::post, Router};

use crate::AppState;

pub use handlers::*;
pub use models::*;
pub use repository::*;

/// Routes mounted under /tenants
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_tenant_handler))
}
