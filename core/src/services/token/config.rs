//! Configuration for the token services

use chrono::Duration;
use kr_shared::config::JwtConfig;

/// Token lifecycle configuration
///
/// Built once at process start from `JwtConfig` and passed by reference;
/// services never read the environment at call time.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// Upper bound on a single ledger/store call during rotation, in
    /// milliseconds; past it the rotation fails rather than block
    pub io_timeout_ms: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
            io_timeout_ms: 5_000,
        }
    }
}

impl TokenConfig {
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
            ..Default::default()
        }
    }
}
