//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: sqlx/SQLite stores,
//! Open-Meteo adapters, configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, CookieConfig, DatabaseConfig, Environment, HistoryConfig, ServerConfig,
};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteCityStore, SqliteDatabaseHealth,
    SqliteSearchHistoryStore,
};
pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry};
