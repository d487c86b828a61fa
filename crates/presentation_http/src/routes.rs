//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API
        .route("/api/weather/search", get(handlers::weather::search))
        .route("/api/weather/forecast", get(handlers::weather::forecast))
        .route("/api/weather/history", get(handlers::weather::history))
        .route("/api/weather/stats", get(handlers::weather::stats))
        // API documentation
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}
