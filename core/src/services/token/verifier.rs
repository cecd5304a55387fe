//! Token verification
//!
//! Read-only: the verifier never mutates the ledger or the store, so any
//! number of requests can verify concurrently.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::{RefreshTokenStore, RevocationLedger};
use crate::services::hashing::CredentialHasher;

use super::codec::ClaimsCodec;

/// Outcome of a successful refresh-token verification
#[derive(Debug, Clone)]
pub struct RefreshVerification {
    /// Owning subject
    pub subject: Uuid,
    /// Token identifier, the revocation key
    pub jti: String,
    /// Store lookup key for the presented raw token
    pub token_hash: String,
}

/// Validates access and refresh tokens against signature, expiry, the
/// revocation ledger, and (for refresh tokens) the refresh-token store
pub struct TokenVerifier<L: RevocationLedger, S: RefreshTokenStore, H: CredentialHasher> {
    codec: Arc<ClaimsCodec>,
    ledger: Arc<L>,
    store: Arc<S>,
    hasher: Arc<H>,
}

impl<L: RevocationLedger, S: RefreshTokenStore, H: CredentialHasher> TokenVerifier<L, S, H> {
    pub fn new(codec: Arc<ClaimsCodec>, ledger: Arc<L>, store: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            codec,
            ledger,
            store,
            hasher,
        }
    }

    /// Verifies an access token and returns its claims
    ///
    /// Checks run cheapest first: expiry and signature via the codec, then
    /// the ledger lookup. A ledger failure fails the verification; a token
    /// is never assumed valid because the ledger could not answer.
    ///
    /// # Errors
    /// * `TokenExpired` / `MalformedToken` - decode failure
    /// * `TokenRevoked` - jti present in the ledger
    /// * `LedgerUnavailable` - ledger could not be consulted
    pub async fn verify_access(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.codec.decode(token)?;

        if self.ledger.is_revoked(&claims.jti).await? {
            tracing::warn!(jti = %claims.jti, "Rejected revoked access token");
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(claims)
    }

    /// Verifies a raw refresh token
    ///
    /// Same decode + ledger checks as access tokens, plus confirmation that
    /// the store still holds a live record for the token's hash.
    ///
    /// # Errors
    /// * `TokenExpired` / `MalformedToken` / `TokenRevoked` - as above
    /// * `RefreshTokenInvalid` - no live store record (unknown, expired, and
    ///   revoked are indistinguishable by design)
    pub async fn verify_refresh(&self, raw_token: &str) -> DomainResult<RefreshVerification> {
        let claims = self.codec.decode(raw_token)?;

        if self.ledger.is_revoked(&claims.jti).await? {
            tracing::warn!(jti = %claims.jti, "Rejected revoked refresh token");
            return Err(TokenError::TokenRevoked.into());
        }

        let subject = claims
            .subject_id()
            .map_err(|_| TokenError::MalformedToken)?;

        let token_hash = self.hasher.hash_opaque_token(raw_token);
        if self.store.find_valid(&token_hash).await?.is_none() {
            return Err(TokenError::RefreshTokenInvalid.into());
        }

        Ok(RefreshVerification {
            subject,
            jti: claims.jti,
            token_hash,
        })
    }
}
