use axum::http::StatusCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{DashboardState, MapState};
use super::view::{self, DashboardView};
use crate::config::{AppConfig, MapConfig};
use crate::error::HttpError;
use crate::forecast::{ForecastEntry, ForecastService};
use crate::geocode::GeocodeService;
use crate::history::SearchHistoryStore;
use crate::impl_into_response;
use crate::weather::{WeatherService, WeatherSnapshot};

/// Popup text shown on a clicked marker before its weather resolves
const LOADING_POPUP: &str = "Loading Weather...";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Map is not initialized")]
    MapNotInitialized,
}

impl HttpError for DashboardError {
    fn status_code(&self) -> StatusCode {
        StatusCode::CONFLICT
    }

    fn error_code(&self) -> &'static str {
        "MAP_NOT_INITIALIZED"
    }
}

impl_into_response!(DashboardError);

/// Owns the dashboard page state and drives the search and map-click flows.
///
/// Fetches within a flow run sequentially and the state lock is never held
/// across them, so two overlapping operations both complete and the one that
/// finishes last wins the visible state. There is no cancellation.
pub struct DashboardService {
    weather: Arc<WeatherService>,
    forecast: Arc<ForecastService>,
    geocode: Arc<GeocodeService>,
    history: Arc<dyn SearchHistoryStore>,
    units: String,
    map_config: MapConfig,
    state: RwLock<DashboardState>,
}

impl DashboardService {
    pub fn new(
        weather: Arc<WeatherService>,
        forecast: Arc<ForecastService>,
        geocode: Arc<GeocodeService>,
        history: Arc<dyn SearchHistoryStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            weather,
            forecast,
            geocode,
            history,
            units: config.units.clone(),
            map_config: config.map.clone(),
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Render the dashboard, creating the map on first view
    pub async fn view(&self) -> DashboardView {
        let history = self.history.load().await;

        let mut state = self.state.write().await;
        if state.map.is_none() {
            state.map = Some(MapState::new(&self.map_config));
            tracing::debug!("Map initialized");
        }
        state.history = history;
        view::render(&state)
    }

    /// Dispose the map and its markers (the page is no longer shown)
    pub async fn close(&self) {
        let mut state = self.state.write().await;
        state.map = None;
        tracing::debug!("Map disposed");
    }

    /// Name-based search flow: geocode, fetch current weather and forecast,
    /// then update state, history and the result marker.
    pub async fn search(&self, city: &str) -> DashboardView {
        tracing::info!(city = %city, "Dashboard search");
        self.state.write().await.begin_operation();

        match self.run_search(city).await {
            Ok((snapshot, forecast)) => {
                // Record first, then re-read: the store does not return the
                // updated list
                if let Err(e) = self.history.record(city).await {
                    tracing::warn!(error = %e, "Failed to persist search history");
                }
                let history = self.history.load().await;

                let mut state = self.state.write().await;
                let popup = format!(
                    "<b>{}</b><br>Weather: {}",
                    city, snapshot.condition.description
                );
                let (lat, lon) = (snapshot.coordinates.lat, snapshot.coordinates.lon);
                state.apply_result(snapshot, forecast);
                state.history = history;
                if let Some(map) = state.map.as_mut() {
                    map.place_result_marker(lat, lon, popup, self.map_config.result_zoom);
                }
                state.loading = false;
                view::render(&state)
            }
            Err(message) => {
                tracing::warn!(city = %city, error = %message, "Dashboard search failed");
                let mut state = self.state.write().await;
                state.apply_failure(message);
                state.loading = false;
                view::render(&state)
            }
        }
    }

    async fn run_search(
        &self,
        city: &str,
    ) -> Result<(WeatherSnapshot, Vec<ForecastEntry>), String> {
        let point = self
            .geocode
            .forward(city)
            .await
            .map_err(|e| e.to_string())?;

        let snapshot = self
            .weather
            .current_by_coords(point.lat, point.lon, &self.units)
            .await
            .map_err(|e| e.to_string())?;

        let forecast = self
            .forecast
            .by_city(city, &self.units)
            .await
            .map_err(|e| e.to_string())?;

        Ok((snapshot, forecast.entries))
    }

    /// Map-click flow: a provisional marker appears before any fetch, then
    /// its popup is filled in with the resolved address and weather.
    pub async fn click(&self, lat: f64, lon: f64) -> Result<DashboardView, DashboardError> {
        tracing::info!(lat = %lat, lon = %lon, "Dashboard map click");

        let provisional = {
            let mut state = self.state.write().await;
            let id = match state.map.as_mut() {
                Some(map) => map.add_marker(lat, lon, LOADING_POPUP),
                None => return Err(DashboardError::MapNotInitialized),
            };
            state.begin_operation();
            id
        };

        let outcome = self.run_click(lat, lon).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok((snapshot, forecast, address)) => {
                let popup = format!(
                    "<b>{}</b><br>Weather: {}",
                    address, snapshot.condition.description
                );
                state.apply_result(snapshot, forecast);
                if let Some(map) = state.map.as_mut() {
                    map.set_popup(provisional, popup);
                }
            }
            Err(message) => {
                tracing::warn!(lat = %lat, lon = %lon, error = %message, "Map-click lookup failed");
                // The provisional marker keeps its loading text
                state.apply_failure(message);
            }
        }
        // Marker cleanup runs on success and failure alike: only the clicked
        // marker survives
        if let Some(map) = state.map.as_mut() {
            map.retain_only(provisional);
        }
        state.loading = false;

        Ok(view::render(&state))
    }

    async fn run_click(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<(WeatherSnapshot, Vec<ForecastEntry>, String), String> {
        let snapshot = self
            .weather
            .current_by_coords(lat, lon, &self.units)
            .await
            .map_err(|e| e.to_string())?;

        let forecast = self
            .forecast
            .by_coords(lat, lon, &self.units)
            .await
            .map_err(|e| e.to_string())?;

        let address = self
            .geocode
            .reverse(lat, lon)
            .await
            .map_err(|e| e.to_string())?;

        Ok((snapshot, forecast.entries, address))
    }
}
