//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `web`: search history policy and visitor cookie
//!
//! Remote provider settings reuse the `integration_weather` config types.

mod database;
mod server;
mod web;

use std::fmt;

use application::ForecastConfig;
use integration_weather::{GeocodingConfig, WeatherConfig};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use web::{CookieConfig, HistoryConfig};

/// Prefix of environment variable overrides (`CITYCAST__SERVER__PORT=8080`)
pub const ENV_PREFIX: &str = "CITYCAST";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Forecast provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Search history configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Visitor cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (optional) and the environment
    ///
    /// `name` is passed to [`config::File::with_name`], so the extension may
    /// be omitted.
    pub fn load_from(name: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(name).required(false))
            // Override with environment variables (e.g., CITYCAST__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Whether internal error details may appear in API responses
    #[must_use]
    pub fn expose_internal_errors(&self) -> bool {
        self.environment != Environment::Production
    }

    /// Settings of the forecast pipeline
    #[must_use]
    pub fn forecast(&self) -> ForecastConfig {
        ForecastConfig {
            forecast_days: self.weather.forecast_days,
            history_policy: self.history.write_policy,
        }
    }
}
