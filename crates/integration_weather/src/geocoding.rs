//! Open-Meteo geocoding client
//!
//! Resolves free-form city names to candidate places using the
//! [Open-Meteo geocoding API](https://open-meteo.com/en/docs/geocoding-api).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::client::USER_AGENT;
use crate::models::{GeocodingApiResponse, GeocodingResult};

/// Largest `count` the geocoding API accepts
pub const MAX_RESULTS: u8 = 100;

/// Configuration for the geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Language of the returned place names
    #[serde(default = "default_language")]
    pub language: String,

    /// Number of candidates requested when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: u8,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "ru".to_string()
}

const fn default_limit() -> u8 {
    5
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            language: default_language(),
            default_limit: default_limit(),
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Geocoding service answered with a server error
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places by name, returning at most `count` candidates in
    /// provider order. No match yields an empty list.
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeocodingResult>, GeocodingError>;
}

/// Open-Meteo geocoding client
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Self::new(GeocodingConfig::default())
    }

    fn search_params(&self, name: &str, count: u8) -> Vec<(&'static str, String)> {
        vec![
            ("name", name.to_string()),
            ("count", count.clamp(1, MAX_RESULTS).to_string()),
            ("language", self.config.language.clone()),
            ("format", "json".to_string()),
        ]
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self), fields(name = %name, count = %count))]
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeocodingResult>, GeocodingError> {
        let url = format!("{}/search", self.config.base_url);
        debug!(url = %url, "Searching places");

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(name, count))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else if e.is_connect() {
                    GeocodingError::ConnectionFailed(e.to_string())
                } else {
                    GeocodingError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodingError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body: GeocodingApiResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let results = body.results.unwrap_or_default();
        debug!(found = results.len(), "Geocoding completed");
        Ok(results)
    }
}
