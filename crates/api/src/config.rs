use std::path::PathBuf;
use std::str::FromStr;

use parish_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// A required variable is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret and database URL have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
    /// External push gateway. Broadcasts are marked `SKIPPED` when unset.
    pub push_gateway_url: Option<String>,
}

/// Where uploaded files are written and how their public URLs are built.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
    /// Prefix for returned URLs, e.g. `https://parish.example.org`. Empty
    /// means URLs are relative (`/uploads/<name>`).
    pub public_base_url: String,
}

impl UploadConfig {
    /// Public URL of a stored file, served under `/uploads`.
    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/uploads/{file_name}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | required                   |
    /// | `UPLOAD_DIR`           | `./uploads`                |
    /// | `UPLOAD_MAX_BYTES`     | `10485760`                 |
    /// | `PUBLIC_BASE_URL`      | empty                      |
    /// | `PUSH_GATEWAY_URL`     | unset                      |
    ///
    /// JWT settings come from [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_env("PORT", 3000)?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 30)?;
        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig::from_env()?;

        let upload = UploadConfig {
            dir: PathBuf::from(env_or("UPLOAD_DIR", "./uploads")),
            max_bytes: parse_env("UPLOAD_MAX_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            public_base_url: env_or("PUBLIC_BASE_URL", ""),
        };

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt,
            upload,
            push_gateway_url,
        })
    }
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

pub(crate) fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
