use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Weather condition description plus the provider's icon id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub description: String,
    /// OpenWeatherMap icon id (e.g. "10d")
    pub icon_id: String,
}

impl Condition {
    /// URL of the provider-hosted icon for this condition
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}.png", self.icon_id)
    }
}

/// Current conditions at one place, replaced wholesale on each successful fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub condition: Condition,
}

// ============================================================================
// OpenWeatherMap wire format (/data/2.5/weather)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentResponse {
    pub name: String,
    pub coord: OwmCoord,
    pub main: OwmMain,
    pub weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmWeather {
    pub description: String,
    pub icon: String,
}

/// Error body the provider returns on non-2xx responses, shared by the
/// current-weather and forecast endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct OwmErrorBody {
    pub message: String,
}
