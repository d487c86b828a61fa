//! Geocoding adapter - Implements GeocodingPort using the Open-Meteo geocoder

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::City;
use integration_weather::{
    GeocodingClient, GeocodingConfig, GeocodingError, GeocodingResult, OpenMeteoGeocodingClient,
};
use tracing::{error, instrument};

/// Adapter for city search through Open-Meteo
pub struct GeocodingAdapter {
    client: OpenMeteoGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"OpenMeteoGeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(GeocodingConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_error(err: &GeocodingError) -> ApplicationError {
        ApplicationError::ProviderUnavailable(err.to_string())
    }

    fn map_result(result: GeocodingResult) -> City {
        City {
            external_id: result.id,
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
            country: result.country,
            admin1: result.admin1,
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<City>, ApplicationError> {
        let results = self.client.search(name, limit).await.map_err(|e| {
            error!(error = %e, "Geocoding request failed");
            Self::map_error(&e)
        })?;

        Ok(results.into_iter().map(Self::map_result).collect())
    }
}
