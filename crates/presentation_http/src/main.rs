//! CityCast HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::{ForecastService, GeoResolver, HistoryService};
use infrastructure::{
    AppConfig, AsyncDatabase, GeocodingAdapter, SqliteCityStore, SqliteDatabaseHealth,
    SqliteSearchHistoryStore, WeatherAdapter, init_telemetry,
};
use presentation_http::{RequestIdLayer, routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_telemetry(&config.telemetry)?;
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!("CityCast v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        history_policy = ?config.history.write_policy,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.expose_internal_errors());

    // Storage
    let database = AsyncDatabase::new(&config.database.pool_config()).await?;
    if config.database.run_migrations {
        database.migrate().await?;
    }
    let pool = database.pool().clone();
    let city_store = Arc::new(SqliteCityStore::new(pool.clone()));
    let history_store = Arc::new(SqliteSearchHistoryStore::new(pool.clone()));

    // Remote providers
    let geocoder = Arc::new(GeocodingAdapter::with_config(config.geocoding.clone())?);
    let weather = Arc::new(WeatherAdapter::with_config(config.weather.clone())?);

    // Services
    let resolver = Arc::new(GeoResolver::new(city_store, geocoder));
    let forecast = ForecastService::with_config(
        Arc::clone(&resolver),
        weather,
        history_store.clone(),
        config.forecast(),
    );
    let history = HistoryService::new(history_store);

    let state = AppState {
        resolver,
        forecast: Arc::new(forecast),
        history: Arc::new(history),
        db_health: Arc::new(SqliteDatabaseHealth::new(pool)),
        config: Arc::new(config.clone()),
    };

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_credentials(true)
    };

    // Last added = outermost: the request id span wraps the trace span
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestIdLayer);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/swagger-ui", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (draining_tx, draining_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = draining_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(draining_rx, shutdown_timeout) => {
            warn!(timeout = ?shutdown_timeout, "Connections still open, shutting down anyway");
        }
    }

    database.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Resolves `timeout` after the shutdown signal fired
async fn drain_deadline(draining: oneshot::Receiver<()>, timeout: Duration) {
    if draining.await.is_ok() {
        info!("Waiting up to {:?} for connections to close...", timeout);
        tokio::time::sleep(timeout).await;
    } else {
        std::future::pending::<()>().await;
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
