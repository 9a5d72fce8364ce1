use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::models::WeatherSnapshot;
use super::service::WeatherError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name to get weather for
    pub city: Option<String>,
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    pub lat: f64,
    pub lon: f64,
    pub units: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub dashboard: &'static str,
}

/// Landing view
///
/// GET /
pub async fn landing() -> Json<LandingResponse> {
    Json(LandingResponse {
        name: "Weather Dashboard",
        version: env!("CARGO_PKG_VERSION"),
        dashboard: "/dashboard",
    })
}

/// Get current weather by query parameter or default city
///
/// GET /weather?city={city}&units={units}
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSnapshot>, WeatherError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let snapshot = state.weather_service.current_by_city(&city, &units).await?;
    Ok(Json(snapshot))
}

/// Get current weather by city path parameter
///
/// GET /weather/{city}?units={units}
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSnapshot>, WeatherError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let snapshot = state.weather_service.current_by_city(&city, &units).await?;
    Ok(Json(snapshot))
}

/// Get current weather at coordinates
///
/// GET /weather/at?lat={lat}&lon={lon}&units={units}
pub async fn get_weather_at(
    State(state): State<AppState>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<WeatherSnapshot>, WeatherError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let snapshot = state
        .weather_service
        .current_by_coords(query.lat, query.lon, &units)
        .await?;
    Ok(Json(snapshot))
}
