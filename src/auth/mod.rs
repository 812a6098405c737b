// Authentication module
// Cookie-based JWT sessions: registration, login, refresh, logout and self lookup

pub mod cookies;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

// Re-export commonly used types
pub use handlers::{login_handler, logout_handler, refresh_handler, register_handler, self_handler};
pub use middleware::RequireAdmin;
pub use models::{IdResponse, LoginRequest, RegisterRequest, Role, UserResponse};
pub use password::CredentialService;
pub use service::{TokenService, UserService};
pub use token::JwtService;

/// Routes mounted under /auth
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/self", get(self_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler))
}
