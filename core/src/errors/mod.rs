//! Domain-specific error types and error handling.

mod types;

pub use types::{AccountError, TokenError};

use kr_shared::config::auth::ConfigError;
use kr_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Core domain errors
///
/// `Config` is fatal at startup; `StoreUnavailable`/`LedgerUnavailable` mean
/// a persistence collaborator timed out or failed, in which case the token
/// under verification is treated as invalid, never as valid.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Refresh token store unavailable")]
    StoreUnavailable,

    #[error("Revocation ledger unavailable")]
    LedgerUnavailable,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP-equivalent status code for the transport boundary.
    ///
    /// Every token-level rejection collapses to 401; configuration and
    /// collaborator failures are server errors.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Token(TokenError::IssuanceFailed) => 500,
            DomainError::Token(_) => 401,
            DomainError::Account(AccountError::InvalidCredentials) => 401,
            DomainError::Account(AccountError::EmailTaken) => 400,
            DomainError::InvalidArgument { .. } => 400,
            DomainError::Config { .. }
            | DomainError::StoreUnavailable
            | DomainError::LedgerUnavailable
            | DomainError::Internal { .. } => 500,
        }
    }
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::Config {
            message: err.to_string(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Token(token_err) => token_err.into(),
            DomainError::Account(account_err) => account_err.into(),
            DomainError::Config { .. } => ErrorResponse::new("CONFIG_ERROR", err.to_string()),
            DomainError::InvalidArgument { .. } => {
                ErrorResponse::new("INVALID_ARGUMENT", err.to_string())
            }
            DomainError::StoreUnavailable => {
                ErrorResponse::new("STORE_UNAVAILABLE", err.to_string())
            }
            DomainError::LedgerUnavailable => {
                ErrorResponse::new("LEDGER_UNAVAILABLE", err.to_string())
            }
            DomainError::Internal { .. } => ErrorResponse::new("INTERNAL_ERROR", err.to_string()),
        }
    }
}
