//! Domain entities

mod city;
mod hourly_series;
mod search_event;

pub use city::{City, fold_name};
pub use hourly_series::{
    DEFAULT_TEMPERATURE_UNIT, ForecastPoint, HourlySeries, TEMPERATURE_2M,
};
pub use search_event::{CityPopularity, SearchEvent};
