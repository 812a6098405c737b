// Shared fixtures for unit and integration tests

use crate::auth::JwtService;
use crate::config::Config;

pub const TEST_PRIVATE_KEY: &str = include_str!("../certs/test/private.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../certs/test/public.pem");
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

pub fn test_jwt_service() -> JwtService {
    JwtService::new(Some(TEST_PRIVATE_KEY), Some(TEST_PUBLIC_KEY), TEST_REFRESH_SECRET)
        .expect("test keys should parse")
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        private_key: Some(TEST_PRIVATE_KEY.to_string()),
        public_key: Some(TEST_PUBLIC_KEY.to_string()),
        refresh_token_secret: TEST_REFRESH_SECRET.to_string(),
        cookie_domain: "localhost".to_string(),
        cors_origin: None,
    }
}
