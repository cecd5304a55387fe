//! Database connection pool management
//!
//! Connection pooling for MySQL using SQLx, with pool sizing and timeouts
//! driven by [`DatabaseConfig`].

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use kr_shared::config::DatabaseConfig;

use crate::InfraError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Errors
    /// * `InfraError::Config` - the connection URL does not parse
    /// * `InfraError::Database` - the URL parsed but the pool could not
    ///   connect (unreachable host, bad credentials)
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfraError> {
        tracing::info!(
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfraError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfraError::Database(e)
            })?;

        tracing::info!("Database connection pool created");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfraError> {
        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                InfraError::Database(e)
            })?;

        Ok(row.0 == 1)
    }

    /// Close all connections in the pool
    ///
    /// Called during application shutdown.
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_creation_with_unparseable_url() {
        // Not a URL at all; must fail in option parsing, before any
        // network activity
        let config = DatabaseConfig {
            url: "not a database url".to_string(),
            ..Default::default()
        };

        let result = DatabasePool::new(&config).await;
        assert!(matches!(result, Err(InfraError::Config(_))));
    }
}
