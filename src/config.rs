// Runtime configuration loaded from the environment

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5501;
const DEFAULT_COOKIE_DOMAIN: &str = "localhost";

/// Errors raised while reading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Service configuration
///
/// The signing keys are optional at startup. A missing private key only
/// surfaces when an access token has to be issued, which matches how the
/// service behaves when it is deployed without signing material.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// PEM encoded RSA private key used to sign access tokens (RS256)
    pub private_key: Option<String>,
    /// PEM encoded RSA public key used to verify access tokens
    pub public_key: Option<String>,
    /// Shared secret for refresh tokens (HS256)
    pub refresh_token_secret: String,
    pub cookie_domain: String,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let refresh_token_secret = required("REFRESH_TOKEN_SECRET")?;

        let host = optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match optional("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let private_key = key_material("PRIVATE_KEY", "PRIVATE_KEY_PATH")?;
        let public_key = key_material("PUBLIC_KEY", "PUBLIC_KEY_PATH")?;

        Ok(Self {
            database_url,
            host,
            port,
            private_key,
            public_key,
            refresh_token_secret,
            cookie_domain: optional("COOKIE_DOMAIN")
                .unwrap_or_else(|| DEFAULT_COOKIE_DOMAIN.to_string()),
            cors_origin: optional("CORS_ORIGIN"),
        })
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

/// Empty values count as unset
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reads a PEM either inline from `inline_var` or from the file named by `path_var`.
/// Inline values may carry escaped newlines, as they usually do in `.env` files.
fn key_material(inline_var: &str, path_var: &str) -> Result<Option<String>, ConfigError> {
    if let Some(inline) = optional(inline_var) {
        return Ok(Some(inline.replace("\\n", "\n")));
    }

    match optional(path_var) {
        Some(path) => std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| ConfigError::KeyFile { path, source }),
        None => Ok(None),
    }
}
