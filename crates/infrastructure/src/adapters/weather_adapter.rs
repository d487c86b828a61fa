//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{HourlySeries, value_objects::GeoLocation};
use integration_weather::{
    HourlyForecast, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, error, instrument};

/// Adapter for hourly forecasts from the Open-Meteo API
pub struct WeatherAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidOperation("Invalid coordinates".into())
            },
            other => ApplicationError::ProviderUnavailable(other.to_string()),
        }
    }

    /// Convert the client forecast into the domain series
    fn map_series(forecast: HourlyForecast) -> Result<HourlySeries, ApplicationError> {
        HourlySeries::new(forecast.time, forecast.temperature_2m, forecast.units)
            .map_err(|e| ApplicationError::ProviderUnavailable(format!("Malformed forecast: {e}")))
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn hourly_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Option<HourlySeries>, ApplicationError> {
        let forecast = self
            .client
            .get_hourly_forecast(location.latitude(), location.longitude(), days)
            .await
            .map_err(|e| {
                error!(error = %e, "Forecast request failed");
                Self::map_error(e)
            })?;

        let Some(forecast) = forecast else {
            debug!("Provider returned no hourly data");
            return Ok(None);
        };

        Self::map_series(forecast).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn new_creates_adapter() {
        assert!(WeatherAdapter::new().is_ok());
    }

    #[test]
    fn debug_impl() {
        let adapter = WeatherAdapter::new().unwrap();
        assert!(format!("{adapter:?}").contains("WeatherAdapter"));
    }

    #[test]
    fn map_error_transport_failures_are_provider_unavailable() {
        for err in [
            WeatherError::ConnectionFailed("refused".into()),
            WeatherError::RequestFailed("HTTP 400".into()),
            WeatherError::ParseError("eof".into()),
            WeatherError::ServiceUnavailable("HTTP 503".into()),
            WeatherError::RateLimitExceeded,
            WeatherError::Timeout,
        ] {
            assert!(matches!(
                WeatherAdapter::map_error(err),
                ApplicationError::ProviderUnavailable(_)
            ));
        }
    }

    #[test]
    fn map_error_invalid_coordinates() {
        assert!(matches!(
            WeatherAdapter::map_error(WeatherError::InvalidCoordinates),
            ApplicationError::InvalidOperation(_)
        ));
    }

    #[test]
    fn map_series_keeps_units() {
        let forecast = HourlyForecast {
            latitude: 55.75,
            longitude: 37.625,
            timezone: None,
            time: vec![1_705_320_000],
            temperature_2m: vec![-8.3],
            units: HashMap::from([("temperature_2m".to_string(), "°C".to_string())]),
        };
        let series = WeatherAdapter::map_series(forecast).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.temperature_unit(), "°C");
    }
}
