//! Unit tests for the token lifecycle services


use std::sync::Arc;

use kr_shared::config::JwtConfig;

use crate::repositories::{MockRefreshTokenStore, MockRevocationLedger};
use crate::services::hashing::BcryptHasher;

use super::{ClaimsCodec, RotationCoordinator, TokenConfig, TokenIssuer, TokenVerifier};

/// Shared wiring for the token service tests
pub(super) struct TestHarness {
    pub codec: Arc<ClaimsCodec>,
    pub ledger: Arc<MockRevocationLedger>,
    pub store: Arc<MockRefreshTokenStore>,
    pub hasher: Arc<BcryptHasher>,
    pub config: TokenConfig,
}

impl TestHarness {
    pub fn new() -> Self {
        let jwt = JwtConfig::new("test-secret-for-unit-tests");
        Self {
            codec: Arc::new(ClaimsCodec::new(&jwt).expect("codec setup")),
            ledger: Arc::new(MockRevocationLedger::new()),
            store: Arc::new(MockRefreshTokenStore::new()),
            // Minimum bcrypt cost keeps the suite fast
            hasher: Arc::new(BcryptHasher::new(4)),
            config: TokenConfig::default(),
        }
    }

    pub fn issuer(&self) -> TokenIssuer<MockRefreshTokenStore, BcryptHasher> {
        TokenIssuer::new(
            Arc::clone(&self.codec),
            Arc::clone(&self.store),
            Arc::clone(&self.hasher),
            self.config.clone(),
        )
    }

    pub fn verifier(
        &self,
    ) -> TokenVerifier<MockRevocationLedger, MockRefreshTokenStore, BcryptHasher> {
        TokenVerifier::new(
            Arc::clone(&self.codec),
            Arc::clone(&self.ledger),
            Arc::clone(&self.store),
            Arc::clone(&self.hasher),
        )
    }

    pub fn coordinator(
        &self,
    ) -> RotationCoordinator<MockRevocationLedger, MockRefreshTokenStore, BcryptHasher> {
        RotationCoordinator::new(
            Arc::clone(&self.codec),
            Arc::clone(&self.ledger),
            Arc::clone(&self.store),
            Arc::clone(&self.hasher),
            self.config.clone(),
        )
    }
}
