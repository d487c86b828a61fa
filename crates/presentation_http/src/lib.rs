//! CityCast HTTP presentation layer
//!
//! This crate provides the JSON API for CityCast: city search, forecasts,
//! search history and statistics, plus health and OpenAPI endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedQuery, ValidationError};
pub use routes::create_router;
pub use state::AppState;
