//! Persistence module
//!
//! sqlx/SQLite storage for resolved cities and the search history.

pub mod async_connection;
pub mod city_store;
pub mod database_health;
pub mod error;
pub mod search_history_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use city_store::SqliteCityStore;
pub use database_health::SqliteDatabaseHealth;
pub use search_history_store::SqliteSearchHistoryStore;
