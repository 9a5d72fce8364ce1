use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::grouping::group_by_day;
use super::models::{DailyForecastResponse, ForecastResponse};
use super::service::ForecastError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: Option<String>,
    pub units: Option<String>,
}

/// Get the flat 5-day/3-hour forecast by query parameter or default city
///
/// GET /forecast?city={city}&units={units}
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ForecastError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let forecast = state.forecast_service.by_city(&city, &units).await?;

    Ok(Json(ForecastResponse {
        city: forecast.city_name,
        units,
        entries: forecast.entries,
    }))
}

/// Get the flat 5-day/3-hour forecast by city path parameter
///
/// GET /forecast/{city}?units={units}
pub async fn get_forecast_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let forecast = state.forecast_service.by_city(&city, &units).await?;

    Ok(Json(ForecastResponse {
        city: forecast.city_name,
        units,
        entries: forecast.entries,
    }))
}

/// Get the forecast grouped into per-calendar-day buckets
///
/// GET /forecast/daily/{city}?units={units}
pub async fn get_daily_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<DailyForecastResponse>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let forecast = state.forecast_service.by_city(&city, &units).await?;

    Ok(Json(DailyForecastResponse {
        city: forecast.city_name,
        units,
        days: group_by_day(forecast.entries),
    }))
}
