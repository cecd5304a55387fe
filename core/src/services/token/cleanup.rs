//! Periodic maintenance of the refresh-token store and revocation ledger
//!
//! Garbage collection only: correctness never depends on a cleanup cycle
//! running. Expired store records and old ledger entries are removed to
//! bound storage growth.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::{RefreshTokenStore, RevocationLedger};

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Ledger entries older than this are eligible for purging (in days).
    /// Must comfortably exceed the refresh TTL so no live token's jti is
    /// ever purged.
    pub ledger_retention_days: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            ledger_retention_days: 30,
            enabled: true,
        }
    }
}

/// Result of a cleanup cycle
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired refresh token records deleted
    pub expired_tokens_deleted: usize,
    /// Number of ledger entries purged
    pub ledger_entries_purged: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Background service deleting expired tokens and stale ledger entries
pub struct TokenCleanupService<L: RevocationLedger + 'static, S: RefreshTokenStore + 'static> {
    ledger: Arc<L>,
    store: Arc<S>,
    config: TokenCleanupConfig,
}

impl<L: RevocationLedger, S: RefreshTokenStore> TokenCleanupService<L, S> {
    pub fn new(ledger: Arc<L>, store: Arc<S>, config: TokenCleanupConfig) -> Self {
        Self {
            ledger,
            store,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Each step is independent; a failing step is recorded and the cycle
    /// continues.
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting token cleanup cycle");

        let mut result = CleanupResult::default();

        match self.store.delete_expired().await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!("Deleted {} expired refresh token records", count);
            }
            Err(e) => {
                error!("Failed to delete expired tokens: {}", e);
                result.errors.push(format!("Store cleanup error: {}", e));
            }
        }

        let cutoff = Utc::now() - Duration::days(self.config.ledger_retention_days);
        match self.ledger.purge_expired(cutoff).await {
            Ok(count) => {
                result.ledger_entries_purged = count;
                info!("Purged {} revocation ledger entries", count);
            }
            Err(e) => {
                error!("Failed to purge ledger entries: {}", e);
                result.errors.push(format!("Ledger cleanup error: {}", e));
            }
        }

        info!(
            "Token cleanup completed - Expired: {}, Ledger: {}",
            result.expired_tokens_deleted, result.ledger_entries_purged
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs a cycle at the configured interval.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Token cleanup cycle failed: {}", e);
                    }
                }
            }
        });
    }
}
