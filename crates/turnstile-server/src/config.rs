use std::fmt;
use std::time::Duration;

use turnstile_core::AppError;
use turnstile_core::password::DEFAULT_COST;
use turnstile_core::token::DEFAULT_TTL_SECS;

/// HTTP server settings read from the process environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub secret: String,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub request_timeout: Duration,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `TURNSTILE_SECRET` (required, non-empty)
    /// - `TURNSTILE_PORT` (optional, defaults to 8000)
    /// - `TURNSTILE_TOKEN_TTL_SECS` (optional, defaults to 86400)
    /// - `TURNSTILE_BCRYPT_COST` (optional, defaults to 10)
    /// - `TURNSTILE_REQUEST_TIMEOUT_SECS` (optional, defaults to 30)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let secret = lookup("TURNSTILE_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("TURNSTILE_SECRET must be set to sign session tokens".into())
            })?;

        let port = parse_or(&lookup, "TURNSTILE_PORT", 8000u16)?;
        let ttl_secs = parse_or(&lookup, "TURNSTILE_TOKEN_TTL_SECS", DEFAULT_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(AppError::ConfigError(
                "TURNSTILE_TOKEN_TTL_SECS must be positive".into(),
            ));
        }
        let bcrypt_cost = parse_or(&lookup, "TURNSTILE_BCRYPT_COST", DEFAULT_COST)?;
        let timeout_secs = parse_or(&lookup, "TURNSTILE_REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            port,
            secret,
            token_ttl: chrono::Duration::seconds(ttl_secs),
            bcrypt_cost,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("Invalid {key} '{raw}'"))),
    }
}
