//! Database connection pool management
//!
//! Pool construction happens once at startup and the handle is injected
//! into the repositories; nothing reads a module-level singleton.

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use rw_core::errors::DomainError;
use rw_shared::config::DatabaseConfig;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create and connect a new pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::database(format!("Failed to connect: {}", e)))?;

        info!(
            max_connections = config.max_connections,
            "database pool connected"
        );

        Ok(Self { pool })
    }

    /// Access the underlying SQLx pool
    pub fn inner(&self) -> MySqlPool {
        self.pool.clone()
    }

    /// Verify the pool can reach the database
    pub async fn is_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Close all connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
