//! City resolution
//!
//! Turns a free-text city name into places, preferring the local city store
//! and falling back to the remote geocoder. Remote results are written back
//! to the store so later lookups stay local.

use std::sync::Arc;

use domain::City;
use tracing::{debug, error, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CityStore, GeocodingPort};

/// Resolves city names through the store and the remote geocoder
pub struct GeoResolver {
    store: Arc<dyn CityStore>,
    geocoder: Arc<dyn GeocodingPort>,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("store", &"<CityStore>")
            .field("geocoder", &"<GeocodingPort>")
            .finish()
    }
}

impl GeoResolver {
    /// Create a resolver over a store and a geocoder
    #[must_use]
    pub fn new(store: Arc<dyn CityStore>, geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self { store, geocoder }
    }

    /// Resolve `query` to an ordered list of cities
    ///
    /// With `use_store`, a case-insensitive exact match in the store is
    /// returned alone and the geocoder is not called. Otherwise the geocoder
    /// is asked for up to `limit` candidates; with `use_store` each of them is
    /// then upserted into the store. Failing to store a candidate is logged
    /// and does not fail the resolution.
    ///
    /// An empty list means no match.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::ProviderUnavailable`] when the geocoder fails, or
    /// [`ApplicationError::Persistence`] when the store lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        query: &str,
        limit: u8,
        use_store: bool,
    ) -> Result<Vec<City>, ApplicationError> {
        if use_store {
            if let Some(city) = self.store.find_by_name(query).await? {
                debug!(city = %city.name, "City resolved from store");
                return Ok(vec![city]);
            }
        }

        let cities = self.geocoder.search(query, limit).await.inspect_err(|e| {
            error!(error = %e, "Geocoding failed");
        })?;
        debug!(found = cities.len(), "City resolved from geocoder");

        if use_store {
            self.remember(&cities).await;
        }

        Ok(cities)
    }

    async fn remember(&self, cities: &[City]) {
        for city in cities {
            if let Err(e) = self.store.upsert_by_external_id(city).await {
                warn!(
                    city = %city.name,
                    external_id = ?city.external_id,
                    error = %e,
                    "Failed to store resolved city"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockCityStore, MockGeocodingPort};

    fn moscow() -> City {
        City::new("Москва", 55.75222, 37.61556)
            .with_external_id(524_901)
            .with_country("Россия")
            .with_admin1("Москва")
    }

    fn moscow_idaho() -> City {
        City::new("Москва", 46.73239, -117.00017)
            .with_external_id(5_601_538)
            .with_country("США")
            .with_admin1("Айдахо")
    }

    fn resolver(store: MockCityStore, geocoder: MockGeocodingPort) -> GeoResolver {
        GeoResolver::new(Arc::new(store), Arc::new(geocoder))
    }

    #[tokio::test]
    async fn store_hit_skips_geocoder() {
        let mut store = MockCityStore::new();
        store
            .expect_find_by_name()
            .withf(|name| name == "москва")
            .times(1)
            .returning(|_| Ok(Some(moscow())));
        store.expect_upsert_by_external_id().times(0);

        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let cities = resolver(store, geocoder)
            .resolve("москва", 5, true)
            .await
            .unwrap();
        assert_eq!(cities, vec![moscow()]);
    }

    #[tokio::test]
    async fn store_miss_calls_geocoder_once_and_upserts_each() {
        let mut store = MockCityStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store
            .expect_upsert_by_external_id()
            .times(2)
            .returning(|city| Ok(city.clone()));

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .withf(|name, limit| name == "Москва" && *limit == 5)
            .times(1)
            .returning(|_, _| Ok(vec![moscow(), moscow_idaho()]));

        let cities = resolver(store, geocoder)
            .resolve("Москва", 5, true)
            .await
            .unwrap();
        assert_eq!(cities, vec![moscow(), moscow_idaho()]);
    }

    #[tokio::test]
    async fn store_failure_on_upsert_is_not_fatal() {
        let mut store = MockCityStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store
            .expect_upsert_by_external_id()
            .times(2)
            .returning(|_| Err(ApplicationError::Persistence("database is locked".into())));

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .returning(|_, _| Ok(vec![moscow(), moscow_idaho()]));

        let cities = resolver(store, geocoder)
            .resolve("Москва", 5, true)
            .await
            .unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[tokio::test]
    async fn empty_geocoder_result_is_not_an_error() {
        let mut store = MockCityStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store.expect_upsert_by_external_id().times(0);

        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().returning(|_, _| Ok(vec![]));

        let cities = resolver(store, geocoder)
            .resolve("Qwxzzy", 1, true)
            .await
            .unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn without_store_neither_reads_nor_writes() {
        let mut store = MockCityStore::new();
        store.expect_find_by_name().times(0);
        store.expect_upsert_by_external_id().times(0);

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![moscow()]));

        let cities = resolver(store, geocoder)
            .resolve("Москва", 1, false)
            .await
            .unwrap();
        assert_eq!(cities, vec![moscow()]);
    }

    #[tokio::test]
    async fn geocoder_failure_is_provider_unavailable() {
        let mut store = MockCityStore::new();
        store.expect_find_by_name().returning(|_| Ok(None));
        store.expect_upsert_by_external_id().times(0);

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .returning(|_, _| Err(ApplicationError::ProviderUnavailable("HTTP 502".into())));

        let result = resolver(store, geocoder).resolve("Москва", 5, true).await;
        assert!(matches!(
            result,
            Err(ApplicationError::ProviderUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn store_lookup_failure_propagates() {
        let mut store = MockCityStore::new();
        store
            .expect_find_by_name()
            .returning(|_| Err(ApplicationError::Persistence("disk I/O error".into())));

        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let result = resolver(store, geocoder).resolve("Москва", 5, true).await;
        assert!(matches!(result, Err(ApplicationError::Persistence(_))));
    }
}
