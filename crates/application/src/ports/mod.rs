//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod city_store;
mod database_health_port;
mod geocoding_port;
mod search_history_store;
mod weather_port;

pub use city_store::CityStore;
#[cfg(test)]
pub use city_store::MockCityStore;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use search_history_store::MockSearchHistoryStore;
pub use search_history_store::SearchHistoryStore;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
