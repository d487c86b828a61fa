//! Forecast pipeline
//!
//! Resolves a city, fetches its hourly temperatures, records the search and
//! shapes the remaining hours for display. Each step completes before the
//! next one starts.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use domain::{City, ForecastPoint, HourlySeries, SearchEvent, UserKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{SearchHistoryStore, WeatherPort};
use crate::services::GeoResolver;

/// What to do when recording a search fails after the forecast was fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryWritePolicy {
    /// Fail the request
    #[default]
    Required,
    /// Log the failure and return the forecast anyway
    BestEffort,
}

/// Forecast pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecast span requested from the provider (default: 1)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Handling of history write failures
    #[serde(default)]
    pub history_policy: HistoryWritePolicy,
}

const fn default_forecast_days() -> u8 {
    1
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
            history_policy: HistoryWritePolicy::default(),
        }
    }
}

/// A resolved city with its upcoming hourly temperatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityForecast {
    /// The city the query resolved to
    pub city: City,
    /// Hours from now on, in series order
    pub forecast: Vec<ForecastPoint>,
}

/// The forecast pipeline
pub struct ForecastService {
    resolver: Arc<GeoResolver>,
    weather: Arc<dyn WeatherPort>,
    history: Arc<dyn SearchHistoryStore>,
    config: ForecastConfig,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("resolver", &self.resolver)
            .field("weather", &"<WeatherPort>")
            .field("history", &"<SearchHistoryStore>")
            .field("config", &self.config)
            .finish()
    }
}

impl ForecastService {
    /// Create a pipeline with default settings
    #[must_use]
    pub fn new(
        resolver: Arc<GeoResolver>,
        weather: Arc<dyn WeatherPort>,
        history: Arc<dyn SearchHistoryStore>,
    ) -> Self {
        Self::with_config(resolver, weather, history, ForecastConfig::default())
    }

    /// Create a pipeline with explicit settings
    #[must_use]
    pub fn with_config(
        resolver: Arc<GeoResolver>,
        weather: Arc<dyn WeatherPort>,
        history: Arc<dyn SearchHistoryStore>,
        config: ForecastConfig,
    ) -> Self {
        Self {
            resolver,
            weather,
            history,
            config,
        }
    }

    /// Get the forecast for `query` on behalf of `user`
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::CityNotFound`] when nothing matches `query`
    /// - [`ApplicationError::ForecastUnavailable`] when the provider has no
    ///   hourly data for the city
    /// - [`ApplicationError::ProviderUnavailable`] when a remote call fails
    /// - [`ApplicationError::Persistence`] when the search cannot be recorded
    ///   under [`HistoryWritePolicy::Required`]
    #[instrument(skip(self, user), fields(user = %user))]
    pub async fn handle(
        &self,
        query: &str,
        user: &UserKey,
    ) -> Result<CityForecast, ApplicationError> {
        let invoked_at = Local::now();
        let city = self
            .resolver
            .resolve(query, 1, true)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::city_not_found(query))?;

        let location = city.location()?;
        let series = self
            .weather
            .hourly_forecast(&location, self.config.forecast_days)
            .await?
            .ok_or(ApplicationError::ForecastUnavailable)?;

        self.record(user, &city).await?;

        let forecast = format_upcoming(&series, &invoked_at);
        debug!(city = %city.name, points = forecast.len(), "Forecast ready");

        Ok(CityForecast { city, forecast })
    }

    async fn record(&self, user: &UserKey, city: &City) -> Result<(), ApplicationError> {
        let event = SearchEvent::now(user.clone(), city.name.clone());
        match self.history.append(&event).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(city = %city.name, error = %e, "Failed to record search");
                match self.config.history_policy {
                    HistoryWritePolicy::Required => Err(e),
                    HistoryWritePolicy::BestEffort => Ok(()),
                }
            },
        }
    }
}

/// Keep the hours at or after `now` and format them in `now`'s time zone
///
/// Points earlier than `now` are dropped. Order follows the series. The unit
/// is the series' `temperature_2m` unit, `°C` when the provider sent none.
pub fn format_upcoming<Tz>(series: &HourlySeries, now: &DateTime<Tz>) -> Vec<ForecastPoint>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let cutoff = now.timestamp();
    let tz = now.timezone();
    let unit = series.temperature_unit();

    series
        .points()
        .filter(|(timestamp, _)| *timestamp >= cutoff)
        .filter_map(|(timestamp, temperature)| {
            let local = tz.timestamp_opt(timestamp, 0).single()?;
            Some(ForecastPoint {
                time: local.format("%H:%M").to_string(),
                temperature,
                unit: unit.to_string(),
            })
        })
        .collect()
}
