//! Mock implementation of RefreshTokenStore for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RefreshTokenStore;

/// In-memory refresh token store for tests
///
/// The write lock around `revoke` gives the same exactly-once transition
/// semantics the MySQL implementation gets from its conditional UPDATE.
#[derive(Default)]
pub struct MockRefreshTokenStore {
    records: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
    fail_puts: AtomicBool,
}

impl MockRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every `put` fails; reads and revokes still work. Used to
    /// exercise issuance failures mid-rotation.
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub async fn get(&self, token_hash: &str) -> Option<RefreshTokenRecord> {
        self.records.read().await.get(token_hash).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Test hook: backdate a record's expiry
    pub async fn expire(&self, token_hash: &str) {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(token_hash) {
            record.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl RefreshTokenStore for MockRefreshTokenStore {
    async fn put(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable);
        }
        let mut records = self.records.write().await;
        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Internal {
                message: "Duplicate token hash".to_string(),
            });
        }
        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_valid(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(token_hash)
            .filter(|record| record.is_valid())
            .cloned())
    }

    async fn revoke(&self, id: Uuid) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        match records.values_mut().find(|record| record.id == id) {
            Some(record) if !record.is_revoked => {
                record.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(token_hash) {
            Some(record) if !record.is_revoked => {
                record.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let mut count = 0;
        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.revoke();
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delete_expired(&self) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        Ok(before - records.len())
    }
}
