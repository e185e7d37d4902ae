use std::str::FromStr;

use crate::auth::jwt::{JwtConfig, DEFAULT_TOKEN_EXPIRY_MINS, MAX_TOKEN_EXPIRY_MINS};

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together")]
    IncompleteBootstrapAdmin,
}

/// Credentials for the admin account created at startup when none exists.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the signing secret has a default suitable for local
/// development. An instance is handed to [`crate::state::AppState`]; nothing
/// reads the environment after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite connection URL (default: `sqlite://cinelog.db`).
    pub database_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing secret and lifetime.
    pub jwt: JwtConfig,
    /// Optional admin account to ensure at startup.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Required | Default               |
    /// |----------------------------|----------|-----------------------|
    /// | `HOST`                     | no       | `0.0.0.0`             |
    /// | `PORT`                     | no       | `3000`                |
    /// | `DATABASE_URL`             | no       | `sqlite://cinelog.db` |
    /// | `REQUEST_TIMEOUT_SECS`     | no       | `30`                  |
    /// | `JWT_SECRET`               | **yes**  | --                    |
    /// | `JWT_EXPIRY_MINS`          | no       | `30` (max one year)   |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | no       | --                    |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | no       | --                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", get("PORT"), 3000u16)?;
        let database_url = get("DATABASE_URL").unwrap_or_else(|| "sqlite://cinelog.db".into());
        let request_timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let token_expiry_mins =
            parse_or("JWT_EXPIRY_MINS", get("JWT_EXPIRY_MINS"), DEFAULT_TOKEN_EXPIRY_MINS)?;
        if !(1..=MAX_TOKEN_EXPIRY_MINS).contains(&token_expiry_mins) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_MINS",
                value: token_expiry_mins.to_string(),
                reason: format!("must be between 1 and {MAX_TOKEN_EXPIRY_MINS}"),
            });
        }

        let bootstrap_admin = match (
            get("BOOTSTRAP_ADMIN_USERNAME"),
            get("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteBootstrapAdmin),
        };

        Ok(Self {
            host,
            port,
            database_url,
            request_timeout_secs,
            jwt: JwtConfig {
                secret,
                token_expiry_mins,
            },
            bootstrap_admin,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
