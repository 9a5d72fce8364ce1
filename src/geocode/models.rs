use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coordinates resolved by forward geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Nominatim wire format
// ============================================================================

/// One `/search` result. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimSearchResult {
    pub lat: String,
    pub lon: String,
}

/// `/reverse` response
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimReverseResponse {
    pub display_name: Option<String>,
}
