//! MySQL implementation of the RevocationLedger trait.
//!
//! The ledger is the `revoked_tokens` table: one row per revoked jti, with
//! the jti as primary key. `INSERT IGNORE` makes revocation idempotent and
//! the primary-key lookup keeps the per-verification check to a point read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use kr_core::errors::{DomainError, DomainResult};
use kr_core::repositories::RevocationLedger;

/// MySQL implementation of RevocationLedger
pub struct MySqlRevocationLedger {
    pool: MySqlPool,
}

impl MySqlRevocationLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationLedger for MySqlRevocationLedger {
    async fn revoke(&self, jti: &str) -> DomainResult<()> {
        let query = "INSERT IGNORE INTO revoked_tokens (jti, revoked_at) VALUES (?, ?)";

        sqlx::query(query)
            .bind(jti)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| ledger_error("insert revoked jti", e))?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        let query = "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = ?) AS revoked";

        let row = sqlx::query(query)
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ledger_error("check revoked jti", e))?;

        let revoked: i8 = row.try_get("revoked").map_err(|e| DomainError::Internal {
            message: format!("Failed to get revocation flag: {}", e),
        })?;

        Ok(revoked == 1)
    }

    async fn purge_expired(&self, revoked_before: DateTime<Utc>) -> DomainResult<usize> {
        let query = "DELETE FROM revoked_tokens WHERE revoked_at < ?";

        let result = sqlx::query(query)
            .bind(revoked_before)
            .execute(&self.pool)
            .await
            .map_err(|e| ledger_error("purge revoked jtis", e))?;

        Ok(result.rows_affected() as usize)
    }
}

fn ledger_error(operation: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Failed to {}: {}", operation, e);
    DomainError::LedgerUnavailable
}
