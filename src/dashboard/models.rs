use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::MapConfig;
use crate::forecast::ForecastEntry;
use crate::weather::{Coordinates, WeatherSnapshot};

/// A map pin bound to coordinates with an attached popup label
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Marker {
    pub id: Uuid,
    pub lat: f64,
    pub lon: f64,
    /// Popup HTML, e.g. `<b>Paris</b><br>Weather: light rain`
    pub popup: String,
}

/// The map widget: created when the dashboard is first viewed, disposed on
/// close. Holds the active marker set.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapState {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapState {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            center: Coordinates {
                lat: config.center_lat,
                lon: config.center_lon,
            },
            zoom: config.zoom,
            markers: Vec::new(),
        }
    }

    /// Add a marker without touching the existing set. Returns its id.
    pub fn add_marker(&mut self, lat: f64, lon: f64, popup: impl Into<String>) -> Uuid {
        let marker = Marker {
            id: Uuid::new_v4(),
            lat,
            lon,
            popup: popup.into(),
        };
        let id = marker.id;
        self.markers.push(marker);
        id
    }

    /// Remove every existing marker, place a single result marker, and
    /// recenter the map on it at `zoom`.
    pub fn place_result_marker(
        &mut self,
        lat: f64,
        lon: f64,
        popup: impl Into<String>,
        zoom: u8,
    ) -> Uuid {
        self.markers.clear();
        let id = self.add_marker(lat, lon, popup);
        self.center = Coordinates { lat, lon };
        self.zoom = zoom;
        id
    }

    /// Remove every marker except `keep`
    pub fn retain_only(&mut self, keep: Uuid) {
        self.markers.retain(|m| m.id == keep);
    }

    /// Replace the popup content of one marker
    pub fn set_popup(&mut self, id: Uuid, popup: impl Into<String>) {
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) {
            marker.popup = popup.into();
        }
    }
}

/// Dashboard page state: current weather, forecast list, loading flag, error
/// banner, map widget and the recent-search snapshot.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub current: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub loading: bool,
    pub error: Option<String>,
    pub map: Option<MapState>,
    pub history: Vec<String>,
}

impl DashboardState {
    /// Entering `Loading`: the error banner is cleared
    pub fn begin_operation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A failed step discards everything gathered so far for the operation
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.current = None;
        self.forecast.clear();
        self.error = Some(message.into());
    }

    /// A completed fetch replaces the weather and forecast state wholesale
    pub fn apply_result(&mut self, snapshot: WeatherSnapshot, forecast: Vec<ForecastEntry>) {
        self.current = Some(snapshot);
        self.forecast = forecast;
        self.error = None;
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// City name to search for
    pub city: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClickRequest {
    /// Clicked latitude
    pub lat: f64,
    /// Clicked longitude
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> MapState {
        MapState::new(&MapConfig::default())
    }

    #[test]
    fn test_new_map_uses_configured_center_and_has_no_markers() {
        let map = map();
        assert_eq!(map.center.lat, 51.505);
        assert_eq!(map.center.lon, -0.09);
        assert_eq!(map.zoom, 13);
        assert!(map.markers.is_empty());
    }

    #[test]
    fn test_place_result_marker_replaces_all_markers() {
        let mut map = map();
        map.add_marker(1.0, 1.0, "old");
        map.add_marker(2.0, 2.0, "older");

        let id = map.place_result_marker(48.85, 2.32, "<b>Paris</b><br>Weather: clear sky", 10);

        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].id, id);
        assert_eq!(map.center.lat, 48.85);
        assert_eq!(map.center.lon, 2.32);
        assert_eq!(map.zoom, 10);
    }

    #[test]
    fn test_retain_only_keeps_just_the_given_marker() {
        let mut map = map();
        let first = map.add_marker(1.0, 1.0, "a");
        let kept = map.add_marker(2.0, 2.0, "Loading Weather...");
        map.add_marker(3.0, 3.0, "c");

        map.retain_only(kept);

        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].id, kept);
        assert_ne!(map.markers[0].id, first);
    }

    #[test]
    fn test_set_popup_updates_only_the_target() {
        let mut map = map();
        let a = map.add_marker(1.0, 1.0, "Loading Weather...");
        map.add_marker(2.0, 2.0, "other");

        map.set_popup(a, "<b>Somewhere</b><br>Weather: mist");

        assert_eq!(map.markers[0].popup, "<b>Somewhere</b><br>Weather: mist");
        assert_eq!(map.markers[1].popup, "other");
    }

    #[test]
    fn test_begin_operation_clears_error_and_sets_loading() {
        let mut state = DashboardState {
            error: Some("Location not found".to_string()),
            ..Default::default()
        };

        state.begin_operation();

        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_apply_failure_discards_partial_data() {
        let mut state = DashboardState::default();
        state.forecast.push(crate::forecast::ForecastEntry {
            timestamp: "2024-01-01 09:00:00".to_string(),
            temperature_c: 1.0,
            condition: crate::weather::Condition {
                description: "mist".to_string(),
                icon_id: "50d".to_string(),
            },
            precipitation_probability: 0.0,
            precipitation_volume_mm: None,
        });

        state.apply_failure("Location not found");

        assert!(state.current.is_none());
        assert!(state.forecast.is_empty());
        assert_eq!(state.error.as_deref(), Some("Location not found"));
    }
}
