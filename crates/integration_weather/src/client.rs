//! Open-Meteo forecast client
//!
//! HTTP client for the hourly temperature endpoint of the Open-Meteo
//! forecast API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ForecastApiResponse, HourlyForecast};

/// User agent sent with every Open-Meteo request
pub(crate) const USER_AGENT: &str = concat!("CityCast/", env!("CARGO_PKG_VERSION"));

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Request timed out")]
    Timeout,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days requested by the pipeline (1-16, default: 1)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_days() -> u8 {
    1
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the hourly temperature forecast for a location
    ///
    /// Returns `Ok(None)` when the provider answered without an hourly block.
    async fn get_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Option<HourlyForecast>, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Query parameters of an hourly forecast request
    fn forecast_params(latitude: f64, longitude: f64, days: u8) -> Vec<(&'static str, String)> {
        let days = days.clamp(1, 16);
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", "temperature_2m".to_string()),
            ("forecast_days", days.to_string()),
            ("format", "json".to_string()),
            ("timeformat", "unixtime".to_string()),
        ]
    }

    /// Turn a raw response into a forecast, checking series alignment
    fn parse_hourly(response: ForecastApiResponse) -> Result<Option<HourlyForecast>, WeatherError> {
        let Some(hourly) = response.hourly else {
            return Ok(None);
        };

        if hourly.time.len() != hourly.temperature_2m.len() {
            return Err(WeatherError::ParseError(format!(
                "hourly series length mismatch: {} timestamps, {} temperatures",
                hourly.time.len(),
                hourly.temperature_2m.len()
            )));
        }

        Ok(Some(HourlyForecast {
            latitude: response.latitude,
            longitude: response.longitude,
            timezone: response.timezone,
            time: hourly.time,
            temperature_2m: hourly.temperature_2m,
            units: response.hourly_units,
        }))
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Option<HourlyForecast>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching hourly forecast");

        let response = self
            .client
            .get(&url)
            .query(&Self::forecast_params(latitude, longitude, days))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout
                } else if e.is_connect() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ForecastApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let forecast = Self::parse_hourly(api_response)?;
        debug!(
            points = forecast.as_ref().map_or(0, |f| f.time.len()),
            "Hourly forecast received"
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::HourlyData;

    fn response(hourly: Option<HourlyData>) -> ForecastApiResponse {
        ForecastApiResponse {
            latitude: 55.75,
            longitude: 37.625,
            timezone: Some("GMT".to_string()),
            hourly,
            hourly_units: HashMap::from([
                ("time".to_string(), "unixtime".to_string()),
                ("temperature_2m".to_string(), "°C".to_string()),
            ]),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.forecast_days, 1);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(OpenMeteoClient::validate_coordinates(55.75, 37.62).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_forecast_params() {
        let params = OpenMeteoClient::forecast_params(55.75, 37.62, 1);
        let lookup: HashMap<_, _> = params.into_iter().collect();
        assert_eq!(lookup["latitude"], "55.75");
        assert_eq!(lookup["longitude"], "37.62");
        assert_eq!(lookup["hourly"], "temperature_2m");
        assert_eq!(lookup["forecast_days"], "1");
        assert_eq!(lookup["format"], "json");
        assert_eq!(lookup["timeformat"], "unixtime");
    }

    #[test]
    fn test_forecast_params_clamp_days() {
        let lookup: HashMap<_, _> = OpenMeteoClient::forecast_params(0.0, 0.0, 20)
            .into_iter()
            .collect();
        assert_eq!(lookup["forecast_days"], "16");

        let lookup: HashMap<_, _> = OpenMeteoClient::forecast_params(0.0, 0.0, 0)
            .into_iter()
            .collect();
        assert_eq!(lookup["forecast_days"], "1");
    }

    #[test]
    fn test_parse_hourly_missing_block() {
        let parsed = OpenMeteoClient::parse_hourly(response(None)).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_hourly_success() {
        let parsed = OpenMeteoClient::parse_hourly(response(Some(HourlyData {
            time: vec![1_700_000_000, 1_700_003_600],
            temperature_2m: vec![-3.1, -2.8],
        })))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.time.len(), 2);
        assert_eq!(parsed.units["temperature_2m"], "°C");
    }

    #[test]
    fn test_parse_hourly_length_mismatch() {
        let result = OpenMeteoClient::parse_hourly(response(Some(HourlyData {
            time: vec![1_700_000_000],
            temperature_2m: vec![],
        })));
        assert!(matches!(result, Err(WeatherError::ParseError(_))));
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));
        let err = WeatherError::ServiceUnavailable("HTTP 502".to_string());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenMeteoClient::with_defaults().is_ok());
    }
}
