//! Weather service port
//!
//! Defines the interface for hourly forecast retrieval.

use async_trait::async_trait;
use domain::{HourlySeries, value_objects::GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get the hourly temperature series for a location
    ///
    /// # Arguments
    /// * `location` - Geographic location
    /// * `days` - Number of forecast days (1-16)
    ///
    /// Returns `Ok(None)` when the provider has no hourly data for the
    /// location. Every call reaches the provider; nothing is cached.
    async fn hourly_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Option<HourlySeries>, ApplicationError>;
}
