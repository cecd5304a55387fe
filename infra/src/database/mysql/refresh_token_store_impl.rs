//! MySQL implementation of the RefreshTokenStore trait.
//!
//! Refresh token records are persisted in the `refresh_tokens` table, keyed
//! by a unique SHA-256 token hash. The conditional UPDATE in [`revoke`] is
//! what makes concurrent rotation safe: MySQL serializes the row write, so
//! exactly one caller observes `rows_affected == 1`.
//!
//! [`revoke`]: kr_core::repositories::RefreshTokenStore::revoke

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use kr_core::domain::entities::token::RefreshTokenRecord;
use kr_core::errors::{DomainError, DomainResult};
use kr_core::repositories::RefreshTokenStore;

/// MySQL implementation of RefreshTokenStore
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> DomainResult<RefreshTokenRecord> {
        let id: String = row
            .try_get("id")
            .map_err(|e| row_error("id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| row_error("user_id", e))?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| row_error("token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| row_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| row_error("expires_at", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| row_error("is_revoked", e))?,
        })
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn put(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .is_some_and(|db| db.is_unique_violation())
                {
                    return DomainError::Internal {
                        message: "Duplicate token hash".to_string(),
                    };
                }
                store_error("save refresh token", e)
            })?;

        Ok(record)
    }

    async fn find_valid(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token_hash = ?
                AND is_revoked = FALSE
                AND expires_at > ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, id: Uuid) -> DomainResult<bool> {
        // Conditional write: rows_affected tells us whether this call made
        // the false -> true transition or lost the race.
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> DomainResult<bool> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("revoke refresh token by hash", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("revoke user refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> DomainResult<usize> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("delete expired refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}

fn store_error(operation: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Failed to {}: {}", operation, e);
    DomainError::StoreUnavailable
}

fn row_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
