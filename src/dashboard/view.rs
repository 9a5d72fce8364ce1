//! Stateless view-model builders for the dashboard's display components.
//! Everything here renders data already fetched; no side effects.

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::models::{DashboardState, MapState};
use crate::forecast::{group_by_day, ForecastEntry};
use crate::weather::WeatherSnapshot;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the dashboard page renders
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub loading: bool,
    /// Inline banner text; failures are shown verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<WeatherCardView>,
    pub forecast_days: Vec<ForecastCardView>,
    /// Recent searches, most recent first
    pub history: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapState>,
}

/// Current-weather card
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherCardView {
    pub city_name: String,
    pub temperature_label: String,
    pub description: String,
    pub icon_url: String,
}

/// One per-day forecast card
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastCardView {
    /// e.g. "Mon, Jan 1", from the first entry of the day
    pub date_heading: String,
    pub rows: Vec<ForecastRowView>,
}

/// One 3-hour row inside a forecast card
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastRowView {
    /// e.g. "9 AM"
    pub time_label: String,
    pub icon_url: String,
    pub description: String,
    pub temperature_label: String,
    /// e.g. "Chance: 42% Volume: 1.2mm"; omitted when both are zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_label: Option<String>,
}

pub fn render(state: &DashboardState) -> DashboardView {
    DashboardView {
        loading: state.loading,
        error: state.error.clone(),
        current: state.current.as_ref().map(weather_card),
        forecast_days: forecast_cards(state.forecast.clone()),
        history: state.history.clone(),
        map: state.map.clone(),
    }
}

pub fn weather_card(snapshot: &WeatherSnapshot) -> WeatherCardView {
    WeatherCardView {
        city_name: snapshot.city_name.clone(),
        temperature_label: temperature_label(snapshot.temperature_c),
        description: snapshot.condition.description.clone(),
        icon_url: snapshot.condition.icon_url(),
    }
}

pub fn forecast_cards(entries: Vec<ForecastEntry>) -> Vec<ForecastCardView> {
    group_by_day(entries)
        .into_iter()
        .map(|group| ForecastCardView {
            date_heading: group
                .entries
                .first()
                .map(|e| date_heading(&e.timestamp))
                .unwrap_or_default(),
            rows: group.entries.iter().map(forecast_row).collect(),
        })
        .collect()
}

fn forecast_row(entry: &ForecastEntry) -> ForecastRowView {
    ForecastRowView {
        time_label: time_label(&entry.timestamp),
        icon_url: entry.condition.icon_url(),
        description: entry.condition.description.clone(),
        temperature_label: temperature_label(entry.temperature_c),
        precipitation_label: precipitation_label(
            entry.precipitation_probability,
            entry.precipitation_volume_mm,
        ),
    }
}

/// "Mon, Jan 1" from the entry timestamp; falls back to the date part when
/// the provider string doesn't parse
fn date_heading(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(dt) => dt.format("%a, %b %-d").to_string(),
        Err(_) => timestamp
            .split_once(' ')
            .map_or(timestamp, |(date, _)| date)
            .to_string(),
    }
}

/// "9 AM" from the entry timestamp; falls back to the raw string
fn time_label(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(dt) => dt.format("%-I %p").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn temperature_label(temperature_c: f64) -> String {
    format!("{}°C", temperature_c.round() as i64)
}

/// Precipitation line: chance and volume parts are each shown only when
/// non-zero; when both are zero there is no line at all
fn precipitation_label(pop: f64, volume_mm: Option<f64>) -> Option<String> {
    let chance = (pop * 100.0).round() as i64;
    let volume = volume_mm.unwrap_or(0.0);

    let mut parts = Vec::with_capacity(2);
    if chance > 0 {
        parts.push(format!("Chance: {}%", chance));
    }
    if volume > 0.0 {
        parts.push(format!("Volume: {:.1}mm", volume));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{Condition, Coordinates};

    fn entry(timestamp: &str, temp: f64, pop: f64, rain: Option<f64>) -> ForecastEntry {
        ForecastEntry {
            timestamp: timestamp.to_string(),
            temperature_c: temp,
            condition: Condition {
                description: "light rain".to_string(),
                icon_id: "10d".to_string(),
            },
            precipitation_probability: pop,
            precipitation_volume_mm: rain,
        }
    }

    #[test]
    fn test_precipitation_label_with_chance_and_volume() {
        assert_eq!(
            precipitation_label(0.42, Some(1.2)),
            Some("Chance: 42% Volume: 1.2mm".to_string())
        );
    }

    #[test]
    fn test_precipitation_label_absent_when_all_zero() {
        assert_eq!(precipitation_label(0.0, None), None);
        assert_eq!(precipitation_label(0.0, Some(0.0)), None);
    }

    #[test]
    fn test_precipitation_label_volume_only() {
        assert_eq!(
            precipitation_label(0.0, Some(0.3)),
            Some("Volume: 0.3mm".to_string())
        );
    }

    #[test]
    fn test_precipitation_label_chance_only() {
        assert_eq!(
            precipitation_label(0.15, None),
            Some("Chance: 15%".to_string())
        );
    }

    #[test]
    fn test_temperature_label_rounds() {
        assert_eq!(temperature_label(17.6), "18°C");
        assert_eq!(temperature_label(-0.4), "0°C");
    }

    #[test]
    fn test_date_heading_format() {
        // 2024-01-01 was a Monday
        assert_eq!(date_heading("2024-01-01 09:00:00"), "Mon, Jan 1");
    }

    #[test]
    fn test_time_label_format() {
        assert_eq!(time_label("2024-01-01 09:00:00"), "9 AM");
        assert_eq!(time_label("2024-01-01 12:00:00"), "12 PM");
        assert_eq!(time_label("2024-01-01 00:00:00"), "12 AM");
        assert_eq!(time_label("2024-01-01 15:00:00"), "3 PM");
    }

    #[test]
    fn test_unparsable_timestamp_falls_back_to_raw_date() {
        assert_eq!(date_heading("tomorrow 09:00:00"), "tomorrow");
    }

    #[test]
    fn test_forecast_cards_heading_comes_from_first_entry() {
        let cards = forecast_cards(vec![
            entry("2024-01-01 09:00:00", 3.0, 0.42, Some(1.2)),
            entry("2024-01-01 12:00:00", 5.0, 0.0, None),
            entry("2024-01-02 09:00:00", 4.0, 0.0, None),
        ]);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].date_heading, "Mon, Jan 1");
        assert_eq!(cards[0].rows.len(), 2);
        assert_eq!(
            cards[0].rows[0].precipitation_label.as_deref(),
            Some("Chance: 42% Volume: 1.2mm")
        );
        assert_eq!(cards[0].rows[1].precipitation_label, None);
        assert_eq!(cards[1].date_heading, "Tue, Jan 2");
    }

    #[test]
    fn test_weather_card_fields() {
        let card = weather_card(&WeatherSnapshot {
            city_name: "London".to_string(),
            coordinates: Coordinates {
                lat: 51.5085,
                lon: -0.1257,
            },
            temperature_c: 17.6,
            condition: Condition {
                description: "light rain".to_string(),
                icon_id: "10d".to_string(),
            },
        });

        assert_eq!(card.city_name, "London");
        assert_eq!(card.temperature_label, "18°C");
        assert_eq!(card.icon_url, "https://openweathermap.org/img/wn/10d.png");
    }
}
