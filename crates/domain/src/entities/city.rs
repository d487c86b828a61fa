//! A named place resolved from the local store or the geocoding provider

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::GeoLocation};

/// One named place
///
/// `external_id` is the provider's identifier; when present it is unique
/// across the city store. It serializes as `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Identifier assigned by the geocoding provider
    #[serde(rename = "id", default)]
    pub external_id: Option<i64>,
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Country name
    #[serde(default)]
    pub country: Option<String>,
    /// First-level administrative region
    #[serde(default)]
    pub admin1: Option<String>,
}

impl City {
    /// Create a city with only the required attributes
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            external_id: None,
            name: name.into(),
            latitude,
            longitude,
            country: None,
            admin1: None,
        }
    }

    /// Set the provider identifier
    #[must_use]
    pub const fn with_external_id(mut self, id: i64) -> Self {
        self.external_id = Some(id);
        self
    }

    /// Set the country
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the administrative region
    #[must_use]
    pub fn with_admin1(mut self, admin1: impl Into<String>) -> Self {
        self.admin1 = Some(admin1.into());
        self
    }

    /// Validated coordinates of this city
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` when the stored coordinates are
    /// out of range.
    pub fn location(&self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.latitude, self.longitude)
    }

    /// Key used for case-insensitive name matching
    #[must_use]
    pub fn folded_name(&self) -> String {
        fold_name(&self.name)
    }
}

/// Unicode-aware lowercase used for name lookups
#[must_use]
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}
