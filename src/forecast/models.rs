use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::weather::Condition;

/// One 3-hour forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastEntry {
    /// Provider timestamp, "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    pub temperature_c: f64,
    pub condition: Condition,
    /// Probability of precipitation, 0..=1
    pub precipitation_probability: f64,
    /// Rain volume over the 3-hour window, mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_volume_mm: Option<f64>,
}

impl ForecastEntry {
    /// Calendar-date part of the timestamp (everything before the first space).
    /// The provider string is taken literally; no timezone conversion.
    pub fn date_key(&self) -> &str {
        self.timestamp
            .split_once(' ')
            .map_or(self.timestamp.as_str(), |(date, _)| date)
    }
}

/// All forecast entries sharing one calendar date, in their original order
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyForecastGroup {
    pub date: String,
    pub entries: Vec<ForecastEntry>,
}

/// Flat forecast list as returned by the forecast endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastResponse {
    pub city: String,
    pub units: String,
    pub entries: Vec<ForecastEntry>,
}

/// Day-grouped forecast as returned by the daily endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyForecastResponse {
    pub city: String,
    pub units: String,
    pub days: Vec<DailyForecastGroup>,
}

// ============================================================================
// OpenWeatherMap wire format (/data/2.5/forecast)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastResponse {
    pub list: Vec<OwmForecastEntry>,
    pub city: OwmCity,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastEntry {
    pub dt_txt: String,
    pub main: OwmForecastMain,
    pub weather: Vec<OwmForecastWeather>,
    #[serde(default)]
    pub pop: f64,
    pub rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmRain {
    #[serde(rename = "3h")]
    pub three_hour_mm: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: timestamp.to_string(),
            temperature_c: 10.0,
            condition: Condition {
                description: "clear sky".to_string(),
                icon_id: "01d".to_string(),
            },
            precipitation_probability: 0.0,
            precipitation_volume_mm: None,
        }
    }

    #[test]
    fn test_date_key_is_prefix_before_first_space() {
        assert_eq!(entry("2024-01-01 09:00:00").date_key(), "2024-01-01");
    }

    #[test]
    fn test_date_key_without_time_part() {
        assert_eq!(entry("2024-01-01").date_key(), "2024-01-01");
    }
}
