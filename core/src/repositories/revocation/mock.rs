//! Mock implementation of RevocationLedger for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedEntry;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RevocationLedger;

/// In-memory revocation ledger for tests
#[derive(Default)]
pub struct MockRevocationLedger {
    entries: Arc<RwLock<HashMap<String, RevokedEntry>>>,
    fail: bool,
}

impl MockRevocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `LedgerUnavailable`
    pub fn unavailable() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl RevocationLedger for MockRevocationLedger {
    async fn revoke(&self, jti: &str) -> DomainResult<()> {
        if self.fail {
            return Err(DomainError::LedgerUnavailable);
        }
        let mut entries = self.entries.write().await;
        entries
            .entry(jti.to_string())
            .or_insert_with(|| RevokedEntry::new(jti));
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        if self.fail {
            return Err(DomainError::LedgerUnavailable);
        }
        let entries = self.entries.read().await;
        Ok(entries.contains_key(jti))
    }

    async fn purge_expired(&self, revoked_before: DateTime<Utc>) -> DomainResult<usize> {
        if self.fail {
            return Err(DomainError::LedgerUnavailable);
        }
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.revoked_at >= revoked_before);
        Ok(before - entries.len())
    }
}
