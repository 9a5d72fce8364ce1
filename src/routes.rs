use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard_handlers;
use crate::forecast::handlers as forecast_handlers;
use crate::history::handlers as history_handlers;
use crate::openapi::swagger_ui;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Build the dashboard routes (the two page views plus its operations)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(weather_handlers::landing))
        .route("/dashboard", get(dashboard_handlers::get_dashboard))
        .route("/dashboard/search", post(dashboard_handlers::search))
        .route("/dashboard/click", post(dashboard_handlers::click))
        .route("/dashboard/close", post(dashboard_handlers::close))
}

/// Build the weather API routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/weather/at", get(weather_handlers::get_weather_at))
        .route(
            "/weather/{city}",
            get(weather_handlers::get_weather_by_city),
        )
}

/// Build the forecast API routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(forecast_handlers::get_forecast))
        .route(
            "/forecast/{city}",
            get(forecast_handlers::get_forecast_by_city),
        )
        .route(
            "/forecast/daily/{city}",
            get(forecast_handlers::get_daily_forecast),
        )
}

/// Build the history API routes
fn history_routes() -> Router<AppState> {
    Router::new().route("/history", get(history_handlers::get_history))
}

/// Assemble the full application router
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(dashboard_routes())
        .merge(weather_routes())
        .merge(forecast_routes())
        .merge(history_routes())
        .merge(swagger_ui())
        .with_state(state)
}
