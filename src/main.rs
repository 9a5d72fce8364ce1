mod cache;
mod config;
mod dashboard;
mod error;
mod forecast;
mod geocode;
mod history;
mod openapi;
mod routes;
mod weather;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cache::{create_geo_cache, start_cache_cleanup_task};
use crate::config::AppConfig;
use crate::dashboard::DashboardService;
use crate::forecast::ForecastService;
use crate::geocode::GeocodeService;
use crate::history::{FileHistoryStore, SearchHistoryStore};
use crate::weather::WeatherService;

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub weather_service: Arc<WeatherService>,
    pub forecast_service: Arc<ForecastService>,
    pub geocode_service: Arc<GeocodeService>,
    pub history_store: Arc<dyn SearchHistoryStore>,
    pub dashboard_service: Arc<DashboardService>,
    pub config: Arc<AppConfig>,
}

/// Create shared HTTP client with connection pooling
fn create_http_client() -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()?;
    Ok(client)
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client()?;
    tracing::debug!("Shared HTTP client created");

    // Forward-geocoding cache with hourly cleanup
    let geo_cache = create_geo_cache();
    start_cache_cleanup_task(Arc::clone(&geo_cache));

    // Initialize services with the shared client
    let weather_service = Arc::new(WeatherService::new(
        http_client.clone(),
        &config.openweathermap_api_key,
    ));
    let forecast_service = Arc::new(ForecastService::new(
        http_client.clone(),
        &config.openweathermap_api_key,
    ));
    let geocode_service = Arc::new(GeocodeService::new(
        http_client.clone(),
        &config.nominatim_url,
        &config.geocoder_user_agent,
        geo_cache,
    ));
    let history_store: Arc<dyn SearchHistoryStore> =
        Arc::new(FileHistoryStore::new(&config.history_path));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&weather_service),
        Arc::clone(&forecast_service),
        Arc::clone(&geocode_service),
        Arc::clone(&history_store),
        &config,
    ));

    // Create shared application state
    let state = AppState {
        http_client,
        weather_service,
        forecast_service,
        geocode_service,
        history_store,
        dashboard_service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::app_router(state)
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                // Request timeout (60 seconds for slow API calls)
                .timeout(Duration::from_secs(60)),
        )
        .layer(TraceLayer::new_for_http());

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
