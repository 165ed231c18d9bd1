//! Environment-driven configuration.

use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Everything the server reads at startup. Only `JWT_SECRET` has no default.
///
/// | Env Var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `MEDIA_ROOT`           | `./media`               |
/// | `MAX_UPLOAD_BYTES`     | `10485760` (10 MiB)     |
/// | `PASSWORD_MIN_LENGTH`  | `8`                     |
///
/// See [`JwtConfig::from_env`] for the token settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Uploads are written below this directory and served from `/media`.
    pub media_root: PathBuf,
    pub max_upload_bytes: usize,
    pub password_min_length: usize,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "3000")?,
            cors_origins: split_list(&var_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            media_root: var_or("MEDIA_ROOT", "./media").into(),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", "10485760")?,
            password_min_length: parse_var("PASSWORD_MIN_LENGTH", "8")?,
            jwt: JwtConfig::from_env()?,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read `name`, falling back to `default`, and parse it.
pub(crate) fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value.parse().map_err(|_| ConfigError::Invalid { name, value })
}
