//! Geocoding port
//!
//! Defines the interface of the remote place-name search.

use async_trait::async_trait;
use domain::City;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for remote city search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search cities by name
    ///
    /// Returns at most `limit` candidates in provider order. An empty list
    /// means no match and is not an error. Transport or status failures map
    /// to [`ApplicationError::ProviderUnavailable`].
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<City>, ApplicationError>;
}
