//! City store port
//!
//! Persistence of resolved cities. The store doubles as a lookup cache for the
//! geocoding provider: rows are written once and never refreshed.

use async_trait::async_trait;
use domain::City;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for city persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Case-insensitive exact-name lookup
    ///
    /// Returns the first stored match. Cities sharing a name in different
    /// countries are not disambiguated.
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, ApplicationError>;

    /// Insert the city unless a row with the same external id exists
    ///
    /// Returns the existing row unchanged when the external id is already
    /// stored, otherwise the inserted row. Must stay idempotent when two
    /// callers race on the same external id. A city without external id is
    /// always inserted.
    async fn upsert_by_external_id(&self, city: &City) -> Result<City, ApplicationError>;
}
