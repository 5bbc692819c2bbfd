//! Environment-driven server configuration, read once at startup.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5002;
const DEFAULT_TOKEN_LIFETIME: &str = "1h";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable not set")]
    MissingSecret,
    #[error("invalid token lifetime `{0}`")]
    InvalidTokenLifetime(String),
}

/// Settings used to sign and verify bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret for token signatures.
    pub jwt_secret: String,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs,
        }
    }
}

/// Everything `main` needs to boot the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let address = env::var("ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        let lifetime =
            env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| DEFAULT_TOKEN_LIFETIME.to_string());
        let token_ttl_secs = parse_lifetime(&lifetime)?;

        Ok(Self {
            database_url,
            address,
            port,
            upload_dir,
            auth: AuthConfig::new(jwt_secret, token_ttl_secs),
        })
    }
}

/// Parse a token lifetime such as `3600`, `90s`, `30m`, `1h` or `7d` into seconds.
pub fn parse_lifetime(input: &str) -> Result<i64, ConfigError> {
    let trimmed = input.trim();
    let invalid = || ConfigError::InvalidTokenLifetime(input.to_string());

    let (digits, multiplier) = match trimmed.chars().last() {
        Some('s') => (&trimmed[..trimmed.len() - 1], 1),
        Some('m') => (&trimmed[..trimmed.len() - 1], 60),
        Some('h') => (&trimmed[..trimmed.len() - 1], 60 * 60),
        Some('d') => (&trimmed[..trimmed.len() - 1], 60 * 60 * 24),
        Some(_) => (trimmed, 1),
        None => return Err(invalid()),
    };

    let value = digits.parse::<i64>().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(invalid());
    }

    value.checked_mul(multiplier).ok_or_else(invalid)
}
