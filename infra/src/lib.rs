//! # Infrastructure Layer
//!
//! Concrete MySQL-backed implementations of the persistence traits defined
//! in `kr_core`:
//!
//! - [`database::MySqlRefreshTokenStore`] for refresh token records
//! - [`database::MySqlRevocationLedger`] for the revoked-jti set
//! - [`database::MySqlUserRepository`] for accounts
//!
//! All implementations share a single [`database::DatabasePool`].

pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
