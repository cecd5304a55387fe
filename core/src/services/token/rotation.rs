//! Refresh-then-rotate orchestration and logout
//!
//! Rotation is the only write-heavy, race-sensitive path in the system. The
//! protocol is ordered so that a crash at any point leaves the old token
//! unusable (a locked-out-but-not-compromised session) and never a
//! double-valid or replayable token.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenStore, RevocationLedger};
use crate::services::hashing::CredentialHasher;

use super::codec::ClaimsCodec;
use super::config::TokenConfig;
use super::issuer::TokenIssuer;

/// Orchestrates the refresh-then-rotate protocol
pub struct RotationCoordinator<L: RevocationLedger, S: RefreshTokenStore, H: CredentialHasher> {
    codec: Arc<ClaimsCodec>,
    ledger: Arc<L>,
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: TokenIssuer<S, H>,
    io_timeout: StdDuration,
}

impl<L, S, H> RotationCoordinator<L, S, H>
where
    L: RevocationLedger,
    S: RefreshTokenStore,
    H: CredentialHasher,
{
    pub fn new(
        codec: Arc<ClaimsCodec>,
        ledger: Arc<L>,
        store: Arc<S>,
        hasher: Arc<H>,
        config: TokenConfig,
    ) -> Self {
        let issuer = TokenIssuer::new(
            Arc::clone(&codec),
            Arc::clone(&store),
            Arc::clone(&hasher),
            config.clone(),
        );

        Self {
            codec,
            ledger,
            store,
            hasher,
            issuer,
            io_timeout: StdDuration::from_millis(config.io_timeout_ms),
        }
    }

    /// Exchanges a valid refresh token for a new access/refresh pair,
    /// invalidating the old one.
    ///
    /// Protocol:
    /// 1. decode claims (`MalformedToken` / `TokenExpired`)
    /// 2. ledger check on the token's jti (`TokenRevoked`)
    /// 3. store lookup by hash (`RefreshTokenInvalid`)
    /// 4. conditional revoke of the record; the loser of a concurrent race
    ///    fails `TokenReuseDetected`. The winner also inserts the old jti
    ///    into the ledger. From this step on the old token is permanently
    ///    unusable, whatever happens next.
    /// 5. issue a new pair for the same subject (`IssuanceFailed`)
    ///
    /// Delivery of the new refresh token to the client is the transport
    /// layer's problem; a delivery failure must not re-validate the old
    /// token.
    pub async fn rotate(&self, raw_token: &str) -> DomainResult<TokenPair> {
        // 1. Decode
        let claims = self.codec.decode(raw_token)?;
        let subject = claims
            .subject_id()
            .map_err(|_| TokenError::MalformedToken)?;

        // 2. Ledger check
        let revoked = self
            .bounded(self.ledger.is_revoked(&claims.jti), || {
                DomainError::LedgerUnavailable
            })
            .await?;
        if revoked {
            tracing::warn!(jti = %claims.jti, "Rotation attempted with revoked refresh token");
            return Err(TokenError::TokenRevoked.into());
        }

        // 3. Store lookup
        let token_hash = self.hasher.hash_opaque_token(raw_token);
        let record = self
            .bounded(self.store.find_valid(&token_hash), || {
                DomainError::StoreUnavailable
            })
            .await?
            .ok_or(TokenError::RefreshTokenInvalid)?;

        // 4. Claim the record. Exactly one concurrent caller observes the
        // false -> true transition; everyone else lost a replay race.
        let claimed = self
            .bounded(self.store.revoke(record.id), || {
                DomainError::StoreUnavailable
            })
            .await?;
        if !claimed {
            tracing::warn!(
                subject = %subject,
                jti = %claims.jti,
                "Refresh token reuse detected: concurrent rotation lost the record"
            );
            return Err(TokenError::TokenReuseDetected.into());
        }

        // The record is revoked; make the jti unusable too. A failure here
        // aborts the rotation with the old token already dead, which is the
        // safe side of the partial-failure space.
        self.bounded(self.ledger.revoke(&claims.jti), || {
            DomainError::LedgerUnavailable
        })
        .await?;

        // 5. Issue the replacement pair
        self.issuer.issue_pair(subject).await
    }

    /// Logs out by revoking the presented refresh token everywhere.
    ///
    /// Best-effort and idempotent: a missing, undecodable, expired, or
    /// already-revoked token is treated as "already logged out". Each step
    /// is independently idempotent and failures are logged, not returned;
    /// this operation is unconditionally safe to call.
    pub async fn logout(&self, raw_token: Option<&str>) {
        let Some(raw_token) = raw_token else {
            return;
        };

        // An expired token fails `decode`, but its jti is unusable anyway;
        // the store revoke by hash below still covers its record.
        if let Ok(claims) = self.codec.decode(raw_token) {
            if let Err(e) = self.ledger.revoke(&claims.jti).await {
                tracing::warn!(jti = %claims.jti, "Logout: ledger revoke failed: {}", e);
            }
        } else {
            tracing::info!("Logout with invalid or expired refresh token");
        }

        let token_hash = self.hasher.hash_opaque_token(raw_token);
        match self.store.revoke_by_hash(&token_hash).await {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Logout: store revoke failed: {}", e);
            }
        }
    }

    /// Revokes every live refresh token belonging to `subject` (global
    /// sign-out across devices).
    pub async fn logout_all(&self, subject: Uuid) -> DomainResult<usize> {
        let count = self.store.revoke_all_for_user(subject).await?;
        tracing::info!(subject = %subject, count, "Revoked all refresh tokens for subject");
        Ok(count)
    }

    /// Bound a ledger/store call by the configured I/O timeout. On timeout
    /// the rotation fails; tokens are never issued on ambiguous outcomes.
    async fn bounded<T, F>(
        &self,
        fut: F,
        on_timeout: impl FnOnce() -> DomainError,
    ) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.io_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout()),
        }
    }
}
