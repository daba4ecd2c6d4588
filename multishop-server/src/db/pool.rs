//! Connection context
//!
//! Wraps a sqlx `PgPool` built from `DatabaseConfig`. The context is created
//! explicitly at service start and handed to services and repositories;
//! there is no process-wide connection state.

use std::time::Duration;

use multishop_core::DatabaseConfig;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use super::StorageError;

/// Explicitly owned connection factory for one service process
#[derive(Debug, Clone)]
pub struct DbContext {
    pool: PgPool,
}

impl DbContext {
    /// Connect eagerly, failing fast if the store is unreachable.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = DbContext::connect(&config.database).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(StorageError::Connection)?;

        tracing::info!(
            max_connections = config.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Build the pool without opening a connection; the first operation connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = pool_options(config)
            .connect_lazy(&config.url)
            .map_err(StorageError::Connection)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Acquire a scoped connection. It returns to the pool when dropped,
    /// whichever way the calling operation exits.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, StorageError> {
        self.pool.acquire().await.map_err(StorageError::Connection)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p multishop-server -- --ignored

    fn database_config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_owned(),
            max_connections: 2,
            acquire_timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let err = DbContext::connect_lazy(&database_config("not a url")).unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn unreachable_store_is_connection_error() {
        let db = DbContext::connect_lazy(&database_config("postgres://shop@127.0.0.1:1/multishop"))
            .expect("lazy pool creation");

        let err = db.acquire().await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn acquires_and_releases_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = DbContext::connect(&database_config(&url)).await.expect("connect");

        {
            let mut conn = db.acquire().await.expect("acquire");
            let result: (i32,) = sqlx::query_as("SELECT 1")
                .fetch_one(&mut *conn)
                .await
                .expect("query failed");
            assert_eq!(result.0, 1);
        }

        // Both connections are free again once the guards drop
        let first = db.acquire().await.expect("first");
        let second = db.acquire().await.expect("second");
        drop((first, second));

        db.close().await;
        assert!(db.pool().is_closed());
    }
}
