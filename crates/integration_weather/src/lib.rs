//! Open-Meteo integration
//!
//! Clients for the Open-Meteo forecast API (<https://open-meteo.com>) and its
//! geocoding API. Neither requires an API key.

pub mod client;
pub mod geocoding;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use geocoding::{GeocodingClient, GeocodingConfig, GeocodingError, OpenMeteoGeocodingClient};
pub use models::{GeocodingResult, HourlyForecast};
