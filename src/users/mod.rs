pub mod handlers;

use axum::{routing::post, Router};

use crate::AppState;

pub use handlers::*;

/// Routes mounted under /users
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_user_handler))
}
