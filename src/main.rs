mod auth;
mod config;
mod db;
mod error;
mod tenants;
mod users;
mod validation;

#[cfg(test)]
mod test_support;

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    repository::{RefreshTokenRepository, UserRepository},
    CredentialService, JwtService, TokenService, UserService,
};
use config::Config;
use db::DbPool;
use tenants::TenantRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::self_handler,
        auth::handlers::refresh_handler,
        auth::handlers::logout_handler,
        tenants::handlers::create_tenant_handler,
        users::handlers::create_user_handler,
    ),
    components(
        schemas(
            auth::Role,
            auth::UserResponse,
            auth::IdResponse,
            auth::RegisterRequest,
            auth::LoginRequest,
            tenants::Tenant,
            tenants::CreateTenantRequest,
            error::ErrorResponse,
            error::ErrorDetail,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and cookie sessions"),
        (name = "tenants", description = "Tenant management"),
        (name = "users", description = "Admin user management")
    ),
    info(
        title = "Auth Service API",
        version = "1.0.0",
        description = "Authentication service issuing JWT access and refresh tokens in cookies"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
    pub credential_service: CredentialService,
    pub tenant_repository: TenantRepository,
}

impl AppState {
    /// Wire repositories and services over a pool
    pub fn new(db: DbPool, config: Config) -> Result<Self, jsonwebtoken::errors::Error> {
        let jwt = Arc::new(JwtService::from_config(&config)?);
        let credential_service = CredentialService::new();

        let token_service = Arc::new(TokenService::new(
            jwt.clone(),
            RefreshTokenRepository::new(db.clone()),
        ));
        let user_service = Arc::new(UserService::new(
            UserRepository::new(db.clone()),
            credential_service.clone(),
        ));

        Ok(Self {
            tenant_repository: TenantRepository::new(db.clone()),
            db,
            config: Arc::new(config),
            jwt,
            token_service,
            user_service,
            credential_service,
        })
    }
}

impl FromRef<AppState> for Arc<JwtService> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

/// Liveness text
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "auth"
)]
async fn root_handler() -> &'static str {
    "Welcome to auth service"
}

/// Cookies only travel cross-origin when a concrete origin is allowed with credentials
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = config
        .cors_origin
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok());

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config));

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root_handler))
        .nest("/auth", auth::routes())
        .nest("/tenants", tenants::routes())
        .nest("/users", users::routes())
        .layer(middleware)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Auth service - Starting...");

    let config = Config::from_env().expect("Invalid configuration");
    if config.private_key.is_none() {
        tracing::warn!("PRIVATE_KEY is not set, access tokens cannot be issued");
    }

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let addr = config.bind_address();
    let state = AppState::new(db_pool, config).expect("Failed to load signing keys");
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Auth service is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
