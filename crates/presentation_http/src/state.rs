//! Application state shared across handlers

use std::sync::Arc;

use application::{DatabaseHealthPort, ForecastService, GeoResolver, HistoryService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// City resolution (store first, then geocoder)
    pub resolver: Arc<GeoResolver>,

    /// Forecast pipeline
    pub forecast: Arc<ForecastService>,

    /// Search history queries
    pub history: Arc<HistoryService>,

    /// Database reachability for readiness checks
    pub db_health: Arc<dyn DatabaseHealthPort>,

    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resolver", &self.resolver)
            .field("forecast", &self.forecast)
            .field("history", &self.history)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
