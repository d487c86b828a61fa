//! Application services - Use case implementations

mod forecast_service;
mod geo_resolver;
mod history_service;

pub use forecast_service::{
    CityForecast, ForecastConfig, ForecastService, HistoryWritePolicy, format_upcoming,
};
pub use geo_resolver::GeoResolver;
pub use history_service::HistoryService;
