use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::error::HttpError;
use crate::impl_into_response;

const CURRENT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Transport-level failure; displayed with the fixed fallback text
    #[error("Failed to fetch current weather")]
    Request(#[from] reqwest::Error),

    /// Provider rejected the request and supplied its own message
    #[error("{0}")]
    Api(String),

    /// Response lacked the expected weather description block, or the
    /// provider's error body carried no message
    #[error("Failed to fetch current weather")]
    InvalidResponse,
}

impl HttpError for WeatherError {
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

impl_into_response!(WeatherError);

pub struct WeatherService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::with_base_url(client, api_key, CURRENT_WEATHER_API_URL)
    }

    /// Point the service at a different endpoint (tests, proxies)
    pub fn with_base_url(client: Client, api_key: &str, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.into(),
        }
    }

    /// Current conditions by city name
    pub async fn current_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(city = %city, units = %units, "Fetching current weather");
        self.fetch(&[("q", city), ("units", units)]).await
    }

    /// Current conditions by coordinates
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(lat = %lat, lon = %lon, units = %units, "Fetching current weather");
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.fetch(&[("lat", &lat), ("lon", &lon), ("units", units)])
            .await
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<WeatherSnapshot, WeatherError> {
        // Use query builder for proper URL encoding - handles spaces and special chars
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received current weather response");

        if !status.is_success() {
            // Surface the provider's own message when it sent one
            return match response.json::<OwmErrorBody>().await {
                Ok(body) => Err(WeatherError::Api(body.message)),
                Err(_) => Err(WeatherError::InvalidResponse),
            };
        }

        let data: OwmCurrentResponse = response.json().await?;
        let snapshot = snapshot_from_wire(data)?;

        tracing::info!(
            city = %snapshot.city_name,
            temp = %snapshot.temperature_c,
            "Current weather fetched"
        );

        Ok(snapshot)
    }
}

fn snapshot_from_wire(data: OwmCurrentResponse) -> Result<WeatherSnapshot, WeatherError> {
    let weather = data.weather.first().ok_or(WeatherError::InvalidResponse)?;

    Ok(WeatherSnapshot {
        city_name: data.name,
        coordinates: Coordinates {
            lat: data.coord.lat,
            lon: data.coord.lon,
        },
        temperature_c: data.main.temp,
        condition: Condition {
            description: weather.description.clone(),
            icon_id: weather.icon.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_current_json() -> &'static str {
        r#"{
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 17.6, "feels_like": 17.3, "humidity": 72},
            "wind": {"speed": 4.1},
            "name": "London"
        }"#
    }

    #[test]
    fn test_snapshot_from_wire() {
        let data: OwmCurrentResponse = serde_json::from_str(sample_current_json()).unwrap();
        let snapshot = snapshot_from_wire(data).unwrap();

        assert_eq!(snapshot.city_name, "London");
        assert_eq!(snapshot.coordinates.lat, 51.5085);
        assert_eq!(snapshot.coordinates.lon, -0.1257);
        assert_eq!(snapshot.temperature_c, 17.6);
        assert_eq!(snapshot.condition.description, "light rain");
        assert_eq!(snapshot.condition.icon_id, "10d");
    }

    #[test]
    fn test_missing_weather_block_uses_fallback_message() {
        let data: OwmCurrentResponse = serde_json::from_str(
            r#"{"coord": {"lon": 0.0, "lat": 0.0}, "weather": [], "main": {"temp": 1.0}, "name": "Null Island"}"#,
        )
        .unwrap();

        let err = snapshot_from_wire(data).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch current weather");
    }

    #[test]
    fn test_api_error_displays_provider_message_verbatim() {
        let err = WeatherError::Api("city not found".to_string());
        assert_eq!(err.to_string(), "city not found");
    }
}
