use axum::http::StatusCode;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::cache::{normalize_cache_key, GeoCache};
use crate::error::HttpError;
use crate::impl_into_response;

/// Network failures, provider errors and empty result sets all collapse into
/// the two "not found" kinds; the dashboard displays them undistinguished.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Location not found")]
    LocationNotFound(#[source] Option<reqwest::Error>),

    #[error("Address not found")]
    AddressNotFound(#[source] Option<reqwest::Error>),
}

impl HttpError for GeocodeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            Self::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
        }
    }
}

impl_into_response!(GeocodeError);

pub struct GeocodeService {
    client: Client,
    base_url: String,
    user_agent: String,
    cache: GeoCache,
}

impl GeocodeService {
    pub fn new(client: Client, base_url: &str, user_agent: &str, cache: GeoCache) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            cache,
        }
    }

    /// Resolve a place name to coordinates (first result only).
    /// Results are cached for 24 hours.
    pub async fn forward(&self, name: &str) -> Result<GeoPoint, GeocodeError> {
        let cache_key = normalize_cache_key(name);

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(name = %name, "Forward geocoding cache hit");
            return Ok(cached);
        }

        tracing::debug!(name = %name, "Forward geocoding");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .header(USER_AGENT, &self.user_agent)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::LocationNotFound(Some(e)))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Forward geocoding failed");
            return Err(GeocodeError::LocationNotFound(None));
        }

        let results: Vec<NominatimSearchResult> = response
            .json()
            .await
            .map_err(|e| GeocodeError::LocationNotFound(Some(e)))?;

        let point = first_search_result(results)?;
        self.cache.insert(cache_key, point);

        tracing::info!(name = %name, lat = %point.lat, lon = %point.lon, "Location resolved");
        Ok(point)
    }

    /// Resolve coordinates to a display address
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodeError> {
        tracing::debug!(lat = %lat, lon = %lon, "Reverse geocoding");

        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::AddressNotFound(Some(e)))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Reverse geocoding failed");
            return Err(GeocodeError::AddressNotFound(None));
        }

        let body: NominatimReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::AddressNotFound(Some(e)))?;

        let address = body
            .display_name
            .ok_or(GeocodeError::AddressNotFound(None))?;

        tracing::info!(lat = %lat, lon = %lon, address = %address, "Address resolved");
        Ok(address)
    }
}

/// Take the first search result and parse its string coordinates
fn first_search_result(results: Vec<NominatimSearchResult>) -> Result<GeoPoint, GeocodeError> {
    let first = results
        .into_iter()
        .next()
        .ok_or(GeocodeError::LocationNotFound(None))?;

    let lat = first
        .lat
        .parse::<f64>()
        .map_err(|_| GeocodeError::LocationNotFound(None))?;
    let lon = first
        .lon
        .parse::<f64>()
        .map_err(|_| GeocodeError::LocationNotFound(None))?;

    Ok(GeoPoint { lat, lon })
}
