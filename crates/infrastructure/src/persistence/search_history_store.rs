//! SQLite search history store

use std::collections::HashSet;

use application::{error::ApplicationError, ports::SearchHistoryStore};
use async_trait::async_trait;
use domain::{CityPopularity, SearchEvent, UserKey};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::map_sqlx_error;

/// Append-only search log backed by the `search_history` table
#[derive(Debug, Clone)]
pub struct SqliteSearchHistoryStore {
    pool: SqlitePool,
}

impl SqliteSearchHistoryStore {
    /// Create a new history store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchHistoryStore for SqliteSearchHistoryStore {
    #[instrument(skip(self, event), fields(user = %event.user, city = %event.city_name))]
    async fn append(&self, event: &SearchEvent) -> Result<(), ApplicationError> {
        sqlx::query(
            r"
            INSERT INTO search_history (user_id, city_name, timestamp)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(event.user.as_str())
        .bind(&event.city_name)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("Search recorded");
        Ok(())
    }

    #[instrument(skip(self), fields(user = %user))]
    async fn list_distinct_recent_first(
        &self,
        user: &UserKey,
    ) -> Result<Vec<String>, ApplicationError> {
        let names: Vec<String> = sqlx::query_scalar(
            r"
            SELECT city_name
            FROM search_history
            WHERE user_id = $1
            ORDER BY timestamp DESC, id DESC
            ",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut seen = HashSet::new();
        Ok(names
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect())
    }

    #[instrument(skip(self))]
    async fn frequency_ranking(&self) -> Result<Vec<CityPopularity>, ApplicationError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r"
            SELECT city_name, COUNT(*) AS searches
            FROM search_history
            GROUP BY city_name
            ORDER BY searches DESC, city_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|(city, count)| CityPopularity::new(city, u64::try_from(count).unwrap_or(0)))
            .collect())
    }
}
