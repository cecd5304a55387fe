//! Refresh token store trait defining the interface for token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainResult;

/// Durable record of issued refresh tokens, keyed by token hash
///
/// Only hashes are stored, never raw token values. The store is the sole
/// mutator of `is_revoked`, which moves false -> true exactly once.
///
/// # Atomicity contract
/// `revoke(id)` is a single conditional state transition: it returns `true`
/// only for the caller that performed the false -> true flip. Two concurrent
/// rotations presenting the same raw token may both observe `find_valid`
/// returning the record, but exactly one gets `revoke -> true`; the other
/// must be treated as a reuse attempt.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g. duplicate hash)
    async fn put(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord>;

    /// Find a record by token hash, only if still redeemable
    ///
    /// Returns `None` for unknown, expired, and revoked hashes alike;
    /// callers must not be able to distinguish the three.
    async fn find_valid(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>>;

    /// Atomically transition the record to revoked
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the false -> true transition
    /// * `Ok(false)` - The record was already revoked or does not exist
    async fn revoke(&self, id: Uuid) -> DomainResult<bool>;

    /// Revoke by token hash; idempotent, used by logout
    ///
    /// # Returns
    /// * `Ok(true)` - A record was transitioned to revoked
    /// * `Ok(false)` - No live record with that hash
    async fn revoke_by_hash(&self, token_hash: &str) -> DomainResult<bool>;

    /// Revoke every live token belonging to `user_id` (global sign-out)
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize>;

    /// Delete expired records from the store
    ///
    /// Called periodically by the cleanup service.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self) -> DomainResult<usize>;
}
