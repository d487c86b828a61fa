//! SQLite city store
//!
//! Lookup cache for geocoding results. Names are matched on `name_folded`,
//! the Unicode lowercase of the display name, so Cyrillic names compare
//! case-insensitively.

use application::{error::ApplicationError, ports::CityStore};
use async_trait::async_trait;
use domain::{City, fold_name};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::map_sqlx_error;

/// City store backed by the `cities` table
#[derive(Debug, Clone)]
pub struct SqliteCityStore {
    pool: SqlitePool,
}

impl SqliteCityStore {
    /// Create a new city store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for SqliteCityStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, ApplicationError> {
        let row: Option<CityRow> = sqlx::query_as(
            r"
            SELECT city_id, name, latitude, longitude, country, admin1
            FROM cities
            WHERE name_folded = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(fold_name(name))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(hit = row.is_some(), "City lookup");
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, city), fields(name = %city.name, external_id = ?city.external_id))]
    async fn upsert_by_external_id(&self, city: &City) -> Result<City, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO cities (city_id, name, name_folded, latitude, longitude, country, admin1)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(city_id) DO NOTHING
            ",
        )
        .bind(city.external_id)
        .bind(&city.name)
        .bind(city.folded_name())
        .bind(city.latitude)
        .bind(city.longitude)
        .bind(&city.country)
        .bind(&city.admin1)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        let stored = match city.external_id {
            Some(external_id) if inserted == 0 => {
                let row: CityRow = sqlx::query_as(
                    r"
                    SELECT city_id, name, latitude, longitude, country, admin1
                    FROM cities
                    WHERE city_id = $1
                    ",
                )
                .bind(external_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
                debug!("City already stored");
                row.into()
            },
            _ => city.clone(),
        };

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(stored)
    }
}

/// Row type for city queries
#[derive(sqlx::FromRow)]
struct CityRow {
    city_id: Option<i64>,
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            external_id: row.city_id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            country: row.country,
            admin1: row.admin1,
        }
    }
}
