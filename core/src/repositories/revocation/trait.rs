//! Revocation ledger trait defining the interface for the revoked-jti set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainResult;

/// Durable set of revoked token identifiers (jti)
///
/// The ledger is consulted on every verification. A revoke must be persisted
/// before the call returns: from that point on the jti is unusable, including
/// under concurrent verification from other workers.
///
/// Unavailability must surface as an error (`LedgerUnavailable`), never as
/// "not revoked".
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Insert `jti` into the ledger.
    ///
    /// Idempotent: revoking an already-revoked jti is a no-op success.
    async fn revoke(&self, jti: &str) -> DomainResult<()>;

    /// Membership check for `jti`. Expected O(1) via an indexed lookup.
    async fn is_revoked(&self, jti: &str) -> DomainResult<bool>;

    /// Delete entries revoked before `revoked_before`.
    ///
    /// Garbage collection only; correctness never depends on it. Safe to
    /// call once the associated token expiries have passed.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries deleted
    async fn purge_expired(&self, revoked_before: DateTime<Utc>) -> DomainResult<usize>;
}
