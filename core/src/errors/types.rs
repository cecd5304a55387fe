//! Domain-specific error types for token and account operations
//!
//! Token-level failures are presented uniformly as unauthorized at the
//! transport boundary; the distinct variants exist for logging and for the
//! rotation protocol, not for callers to probe.

use kr_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token revoked")]
    TokenRevoked,

    /// Store miss, expired record, or already-revoked record. Deliberately
    /// a single variant so callers cannot distinguish the three.
    #[error("Invalid refresh token")]
    RefreshTokenInvalid,

    /// A concurrent rotation of the same refresh token already claimed the
    /// record. Logged distinctly for security monitoring.
    #[error("Refresh token reuse detected")]
    TokenReuseDetected,

    /// The refresh token was signed but could not be durably recorded; the
    /// whole issuance fails and no token is released.
    #[error("Token issuance failed")]
    IssuanceFailed,
}

/// Account-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Unknown email and wrong password map to the same variant to avoid
    /// account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,
}

impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        let error_code = match err {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::MalformedToken => "MALFORMED_TOKEN",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
            TokenError::TokenReuseDetected => "TOKEN_REUSE_DETECTED",
            TokenError::IssuanceFailed => "ISSUANCE_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<&AccountError> for ErrorResponse {
    fn from(err: &AccountError) -> Self {
        let error_code = match err {
            AccountError::InvalidCredentials => "INVALID_CREDENTIALS",
            AccountError::EmailTaken => "EMAIL_TAKEN",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
