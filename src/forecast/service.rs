use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::error::HttpError;
use crate::impl_into_response;
use crate::weather::models::OwmErrorBody;
use crate::weather::Condition;

const FORECAST_API_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Error, Debug)]
pub enum ForecastError {
    /// Transport-level failure; displayed with the fixed fallback text
    #[error("Failed to fetch forecast")]
    Request(#[from] reqwest::Error),

    /// Provider rejected the request and supplied its own message
    #[error("{0}")]
    Api(String),

    /// Response was unusable and the provider's error body carried no message
    #[error("Failed to fetch forecast")]
    InvalidResponse,
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Request(_) => StatusCode::BAD_GATEWAY,
            Self::Api(_) => StatusCode::BAD_REQUEST,
            Self::InvalidResponse => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "REQUEST_ERROR",
            Self::Api(_) => "API_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
        }
    }
}

impl_into_response!(ForecastError);

/// Fetched forecast: the provider's resolved city name plus the ordered
/// 3-hour entries (up to 40, covering 5 days)
#[derive(Debug, Clone)]
pub struct FetchedForecast {
    pub city_name: String,
    pub entries: Vec<ForecastEntry>,
}

pub struct ForecastService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ForecastService {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::with_base_url(client, api_key, FORECAST_API_URL)
    }

    /// Point the service at a different endpoint (tests, proxies)
    pub fn with_base_url(client: Client, api_key: &str, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.into(),
        }
    }

    /// 5-day/3-hour forecast by city name
    pub async fn by_city(&self, city: &str, units: &str) -> Result<FetchedForecast, ForecastError> {
        tracing::debug!(city = %city, units = %units, "Fetching forecast");
        self.fetch(&[("q", city), ("units", units)]).await
    }

    /// 5-day/3-hour forecast by coordinates
    pub async fn by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<FetchedForecast, ForecastError> {
        tracing::debug!(lat = %lat, lon = %lon, units = %units, "Fetching forecast");
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.fetch(&[("lat", &lat), ("lon", &lon), ("units", units)])
            .await
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<FetchedForecast, ForecastError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        if !status.is_success() {
            return match response.json::<OwmErrorBody>().await {
                Ok(body) => Err(ForecastError::Api(body.message)),
                Err(_) => Err(ForecastError::InvalidResponse),
            };
        }

        let data: OwmForecastResponse = response.json().await?;
        let forecast = forecast_from_wire(data)?;

        tracing::info!(
            city = %forecast.city_name,
            entries = forecast.entries.len(),
            "Forecast fetched"
        );

        Ok(forecast)
    }
}

fn forecast_from_wire(data: OwmForecastResponse) -> Result<FetchedForecast, ForecastError> {
    let entries = data
        .list
        .into_iter()
        .map(|item| {
            // An entry without a weather description block fails the whole
            // call, same as the current-weather endpoint
            let weather = item
                .weather
                .into_iter()
                .next()
                .ok_or(ForecastError::InvalidResponse)?;

            Ok(ForecastEntry {
                timestamp: item.dt_txt,
                temperature_c: item.main.temp,
                condition: Condition {
                    description: weather.description,
                    icon_id: weather.icon,
                },
                precipitation_probability: item.pop,
                precipitation_volume_mm: item.rain.map(|r| r.three_hour_mm),
            })
        })
        .collect::<Result<Vec<_>, ForecastError>>()?;

    Ok(FetchedForecast {
        city_name: data.city.name,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forecast_json() -> &'static str {
        r#"{
            "list": [
                {
                    "dt": 1704096000,
                    "main": {"temp": 6.4},
                    "weather": [{"description": "light rain", "icon": "10d"}],
                    "wind": {"speed": 3.2},
                    "pop": 0.42,
                    "rain": {"3h": 1.2},
                    "dt_txt": "2024-01-01 09:00:00"
                },
                {
                    "dt": 1704106800,
                    "main": {"temp": 7.1},
                    "weather": [{"description": "overcast clouds", "icon": "04d"}],
                    "wind": {"speed": 2.8},
                    "pop": 0,
                    "dt_txt": "2024-01-01 12:00:00"
                }
            ],
            "city": {"name": "Paris", "country": "FR"}
        }"#
    }

    #[test]
    fn test_forecast_from_wire() {
        let data: OwmForecastResponse = serde_json::from_str(sample_forecast_json()).unwrap();
        let forecast = forecast_from_wire(data).unwrap();

        assert_eq!(forecast.city_name, "Paris");
        assert_eq!(forecast.entries.len(), 2);

        let first = &forecast.entries[0];
        assert_eq!(first.timestamp, "2024-01-01 09:00:00");
        assert_eq!(first.temperature_c, 6.4);
        assert_eq!(first.condition.description, "light rain");
        assert_eq!(first.precipitation_probability, 0.42);
        assert_eq!(first.precipitation_volume_mm, Some(1.2));

        let second = &forecast.entries[1];
        assert_eq!(second.precipitation_probability, 0.0);
        assert_eq!(second.precipitation_volume_mm, None);
    }

    #[test]
    fn test_forecast_entry_order_is_preserved() {
        let data: OwmForecastResponse = serde_json::from_str(sample_forecast_json()).unwrap();
        let forecast = forecast_from_wire(data).unwrap();

        let stamps: Vec<&str> = forecast
            .entries
            .iter()
            .map(|e| e.timestamp.as_str())
            .collect();
        assert_eq!(stamps, vec!["2024-01-01 09:00:00", "2024-01-01 12:00:00"]);
    }

    #[test]
    fn test_entry_without_weather_block_fails_with_fallback_message() {
        let json = r#"{
            "list": [
                {
                    "dt": 1704096000,
                    "main": {"temp": 6.4},
                    "weather": [],
                    "pop": 0.42,
                    "dt_txt": "2024-01-01 09:00:00"
                }
            ],
            "city": {"name": "Paris", "country": "FR"}
        }"#;

        let data: OwmForecastResponse = serde_json::from_str(json).unwrap();
        let err = forecast_from_wire(data).unwrap_err();

        assert!(matches!(err, ForecastError::InvalidResponse));
        assert_eq!(err.to_string(), "Failed to fetch forecast");
    }
}
