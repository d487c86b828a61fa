//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document of the CityCast HTTP API together with
//! Swagger UI.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for CityCast
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CityCast API",
        description = "City search and hourly temperature forecasts backed by Open-Meteo",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness endpoints"),
        (name = "weather", description = "City search, forecasts, history and statistics")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::weather::search,
        handlers::weather::forecast,
        handlers::weather::history,
        handlers::weather::stats,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::DatabaseStatus,
            handlers::weather::CityResponse,
            handlers::weather::ForecastPointResponse,
            handlers::weather::SearchResponse,
            handlers::weather::ForecastResponse,
            handlers::weather::HistoryResponse,
            handlers::weather::CityStatResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// - `/api-docs/openapi.json`: the OpenAPI document
/// - `/swagger-ui`: interactive documentation
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
