//! Wire models for the Open-Meteo APIs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw response of `GET /forecast`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
    #[serde(default)]
    pub hourly_units: HashMap<String, String>,
}

/// Hourly block of a forecast response, requested with `timeformat=unixtime`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HourlyData {
    pub time: Vec<i64>,
    pub temperature_2m: Vec<f64>,
}

/// Raw response of `GET /search` on the geocoding API
///
/// `results` is absent entirely when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingApiResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

/// One geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    /// Provider identifier (GeoNames id)
    #[serde(default)]
    pub id: Option<i64>,
    /// Localized place name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Localized country name
    #[serde(default)]
    pub country: Option<String>,
    /// First-level administrative region
    #[serde(default)]
    pub admin1: Option<String>,
}

/// Hourly temperature forecast for one coordinate pair
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    /// Latitude the provider snapped to
    pub latitude: f64,
    /// Longitude the provider snapped to
    pub longitude: f64,
    /// Provider time zone name, if reported
    pub timezone: Option<String>,
    /// Unix timestamps, one per hour
    pub time: Vec<i64>,
    /// Temperatures aligned with `time`
    pub temperature_2m: Vec<f64>,
    /// Unit label per hourly quantity
    pub units: HashMap<String, String>,
}
