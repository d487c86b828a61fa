//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` on top of the sqlx pool.

use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use super::error::map_sqlx_error;

/// SQLite database health adapter
#[derive(Debug, Clone)]
pub struct SqliteDatabaseHealth {
    pool: SqlitePool,
}

impl SqliteDatabaseHealth {
    /// Create a new database health adapter with the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                false
            },
        }
    }

    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let start = Instant::now();

        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Database health check failed");
                map_sqlx_error(e)
            })?;

        #[allow(clippy::cast_possible_truncation)]
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            version = %version,
            response_time_ms,
            "Database health check passed"
        );

        Ok(DatabaseHealth::reachable(format!("SQLite {version}"))
            .with_response_time(response_time_ms))
    }
}
