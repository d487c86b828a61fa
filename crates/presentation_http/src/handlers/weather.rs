//! Weather API handlers
//!
//! City search, forecasts, per-visitor history and global search statistics.
//! Visitors are told apart by an opaque id kept in a long-lived cookie.

use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::{City, CityPopularity, CityQuery, ForecastPoint, UserKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedQuery, validate_city_name},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Response / request DTOs
// ---------------------------------------------------------------------------

/// A resolved city
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 524_901,
    "name": "Москва",
    "latitude": 55.75222,
    "longitude": 37.61556,
    "country": "Россия",
    "admin1": "Москва"
}))]
pub struct CityResponse {
    /// Geocoding provider id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.external_id,
            name: city.name,
            latitude: city.latitude,
            longitude: city.longitude,
            country: city.country,
            admin1: city.admin1,
        }
    }
}

/// One upcoming forecast hour
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"time": "14:00", "temperature": -7.9, "unit": "°C"}))]
pub struct ForecastPointResponse {
    /// Local wall-clock time, `HH:MM`
    pub time: String,
    pub temperature: f64,
    pub unit: String,
}

impl From<ForecastPoint> for ForecastPointResponse {
    fn from(point: ForecastPoint) -> Self {
        Self {
            time: point.time,
            temperature: point.temperature,
            unit: point.unit,
        }
    }
}

/// City search query
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct SearchQuery {
    /// City name, at least two characters
    #[validate(custom(function = "validate_city_name"))]
    pub q: String,
}

/// City search result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// Candidates in provider order; empty when nothing matched
    pub cities: Vec<CityResponse>,
}

/// Forecast query
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ForecastQuery {
    /// City name, at least two characters
    #[validate(custom(function = "validate_city_name"))]
    pub city: String,
}

/// Forecast for a resolved city
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForecastResponse {
    pub city: CityResponse,
    /// Hours from now on
    pub forecast: Vec<ForecastPointResponse>,
}

/// The visitor's recent searches
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"history": ["Казань", "Москва"]}))]
pub struct HistoryResponse {
    /// City names, most recent first, without repeats
    pub history: Vec<String>,
}

/// Search count for one city
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"city": "Москва", "count": 3}))]
pub struct CityStatResponse {
    pub city: String,
    pub count: u64,
}

impl From<CityPopularity> for CityStatResponse {
    fn from(stat: CityPopularity) -> Self {
        Self {
            city: stat.city,
            count: stat.count,
        }
    }
}

// ---------------------------------------------------------------------------
// Visitor cookie
// ---------------------------------------------------------------------------

fn visitor_key(state: &AppState, jar: &CookieJar) -> Option<UserKey> {
    jar.get(&state.config.cookie.name)
        .and_then(|cookie| UserKey::parse(cookie.value()).ok())
}

/// The visitor's key, issuing a fresh cookie when there is none
fn ensure_visitor(state: &AppState, jar: CookieJar) -> (CookieJar, UserKey) {
    if let Some(user) = visitor_key(state, &jar) {
        return (jar, user);
    }

    let user = UserKey::generate();
    let cookie = Cookie::build((state.config.cookie.name.clone(), user.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(i64::from(
            state.config.cookie.max_age_days,
        )));
    debug!(user = %user, "Issued visitor cookie");
    (jar.add(cookie), user)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Search cities by name
///
/// GET /api/weather/search?q=
#[utoipa::path(
    get,
    path = "/api/weather/search",
    tag = "weather",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching cities", body = SearchResponse),
        (status = 400, description = "Query too short", body = crate::error::ErrorResponse),
        (status = 503, description = "Geocoding provider unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(q = %query.q))]
pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = CityQuery::parse(&query.q)?;
    let cities = state
        .resolver
        .resolve(query.as_str(), state.config.geocoding.default_limit, true)
        .await?;

    Ok(Json(SearchResponse {
        cities: cities.into_iter().map(CityResponse::from).collect(),
    }))
}

/// Hourly forecast for a city
///
/// GET /api/weather/forecast?city=
///
/// Records the search in the visitor's history. A visitor without the id
/// cookie receives one.
#[utoipa::path(
    get,
    path = "/api/weather/forecast",
    tag = "weather",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Upcoming hourly temperatures", body = ForecastResponse),
        (status = 400, description = "City name too short", body = crate::error::ErrorResponse),
        (status = 404, description = "City not found or no forecast", body = crate::error::ErrorResponse),
        (status = 503, description = "Provider unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(city = %query.city))]
pub async fn forecast(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedQuery(query): ValidatedQuery<ForecastQuery>,
) -> (CookieJar, Result<Json<ForecastResponse>, ApiError>) {
    let (jar, user) = ensure_visitor(&state, jar);
    (jar, city_forecast(&state, &query.city, &user).await)
}

async fn city_forecast(
    state: &AppState,
    city: &str,
    user: &UserKey,
) -> Result<Json<ForecastResponse>, ApiError> {
    let query = CityQuery::parse(city)?;
    let result = state.forecast.handle(query.as_str(), user).await?;

    Ok(Json(ForecastResponse {
        city: result.city.into(),
        forecast: result.forecast.into_iter().map(Into::into).collect(),
    }))
}

/// The visitor's recent searches
///
/// GET /api/weather/history
#[utoipa::path(
    get,
    path = "/api/weather/history",
    tag = "weather",
    responses(
        (status = 200, description = "Recently searched cities", body = HistoryResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn history(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<HistoryResponse>, ApiError> {
    let user = visitor_key(&state, &jar);
    let history = state.history.recent_cities(user.as_ref()).await?;
    Ok(Json(HistoryResponse { history }))
}

/// Search counts per city across all visitors
///
/// GET /api/weather/stats
#[utoipa::path(
    get,
    path = "/api/weather/stats",
    tag = "weather",
    responses(
        (status = 200, description = "Cities by search count, most searched first", body = Vec<CityStatResponse>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<Vec<CityStatResponse>>, ApiError> {
    let ranking = state.history.popularity().await?;
    Ok(Json(ranking.into_iter().map(Into::into).collect()))
}
