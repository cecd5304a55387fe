//! Token lifecycle services
//!
//! This module handles all token-related operations:
//! - Claims signing and parsing (codec)
//! - Access/refresh pair issuance
//! - Verification against signature, expiry, ledger, and store
//! - Refresh-then-rotate orchestration and logout
//! - Background cleanup of expired tokens and ledger entries

mod cleanup;
mod codec;
mod config;
mod issuer;
mod rotation;
mod verifier;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use codec::ClaimsCodec;
pub use config::TokenConfig;
pub use issuer::TokenIssuer;
pub use rotation::RotationCoordinator;
pub use verifier::{RefreshVerification, TokenVerifier};
