//! Token issuance

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshTokenRecord, TokenPair};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RefreshTokenStore;
use crate::services::hashing::CredentialHasher;

use super::codec::ClaimsCodec;
use super::config::TokenConfig;

/// Builds access/refresh token pairs and records the refresh token
pub struct TokenIssuer<S: RefreshTokenStore, H: CredentialHasher> {
    codec: Arc<ClaimsCodec>,
    store: Arc<S>,
    hasher: Arc<H>,
    config: TokenConfig,
}

impl<S: RefreshTokenStore, H: CredentialHasher> TokenIssuer<S, H> {
    pub fn new(codec: Arc<ClaimsCodec>, store: Arc<S>, hasher: Arc<H>, config: TokenConfig) -> Self {
        Self {
            codec,
            store,
            hasher,
            config,
        }
    }

    /// Issues an access/refresh pair for `subject` with the configured TTLs
    pub async fn issue_pair(&self, subject: Uuid) -> DomainResult<TokenPair> {
        self.issue_pair_with(subject, self.config.access_ttl(), self.config.refresh_ttl())
            .await
    }

    /// Issues an access/refresh pair with explicit TTLs
    ///
    /// Signs both tokens, then persists the refresh token's hash. If the
    /// store write fails after signing, the whole operation fails with
    /// `IssuanceFailed`: a refresh token that was never durably recorded is
    /// indistinguishable from a forged one and can never be redeemed, so it
    /// must not be handed out as a success.
    pub async fn issue_pair_with(
        &self,
        subject: Uuid,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> DomainResult<TokenPair> {
        let (access_token, _access_jti) = self.codec.encode(subject, access_ttl)?;
        let (refresh_token, refresh_jti) = self.codec.encode(subject, refresh_ttl)?;

        let token_hash = self.hasher.hash_opaque_token(&refresh_token);
        let record = RefreshTokenRecord::new(subject, token_hash, Utc::now() + refresh_ttl);

        if let Err(e) = self.store.put(record).await {
            tracing::error!(
                subject = %subject,
                jti = %refresh_jti,
                "Failed to persist refresh token: {}",
                e
            );
            return Err(TokenError::IssuanceFailed.into());
        }

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_ttl,
            refresh_ttl,
        ))
    }
}
