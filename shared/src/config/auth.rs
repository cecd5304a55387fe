//! Authentication configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration at startup.
///
/// These are fatal: the process must not come up with a partial
/// signing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Algorithm for JWT signing (e.g. "HS256")
    pub algorithm: String,

    /// Access token expiry time in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token expiry time in days
    pub refresh_token_expiry_days: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            algorithm: String::from("HS256"),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
            issuer: String::from("keyrail"),
            audience: Some(String::from("keyrail-api")),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Load from environment variables.
    ///
    /// `JWT_SECRET` and `JWT_ALGORITHM` are required; a missing or empty
    /// value is a startup failure, never a per-request one. Expiry windows
    /// fall back to 15 minutes / 7 days.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = require_env("JWT_SECRET")?;
        let algorithm = require_env("JWT_ALGORITHM")?;

        let access_token_expiry_minutes =
            parse_env_or("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", 15)?;
        let refresh_token_expiry_days = parse_env_or("JWT_REFRESH_TOKEN_EXPIRY_DAYS", 7)?;

        Ok(Self {
            secret,
            algorithm,
            access_token_expiry_minutes,
            refresh_token_expiry_days,
            issuer: String::from("keyrail"),
            audience: Some(String::from("keyrail-api")),
        })
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }

    /// Refresh token expiry expressed in seconds (cookie max-age)
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.refresh_token_expiry_days * 86400
    }
}

/// Refresh-token cookie configuration
///
/// Describes the cookie contract consumed by the transport layer: the raw
/// refresh token travels in an http-only, same-site-restricted cookie whose
/// lifetime matches the refresh TTL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name carrying the refresh token
    pub name: String,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            secure: false, // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar {
            name: name.to_string(),
        }),
    }
}

fn parse_env_or(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.refresh_token_expiry_days, 14);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_refresh_expiry_seconds() {
        let config = JwtConfig::default();
        assert_eq!(config.refresh_token_expiry_seconds(), 604800);
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.name, "refresh_token");
        assert_eq!(config.same_site, "Lax");
        assert!(config.http_only);
        assert!(!config.secure);
    }
}
