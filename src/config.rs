use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key
    pub openweathermap_api_key: String,

    /// Default city for weather queries
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Temperature units: metric, imperial, or standard
    #[serde(default = "default_units")]
    pub units: String,

    /// Base URL of the Nominatim geocoding service
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// User-Agent sent to Nominatim (required by their usage policy)
    #[serde(default = "default_geocoder_user_agent")]
    pub geocoder_user_agent: String,

    /// Path of the JSON file holding the recent-search history
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Map defaults used when a dashboard first opens
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// Initial map center latitude
    #[serde(default = "default_map_lat")]
    pub center_lat: f64,

    /// Initial map center longitude
    #[serde(default = "default_map_lon")]
    pub center_lon: f64,

    /// Initial zoom level
    #[serde(default = "default_map_zoom")]
    pub zoom: u8,

    /// Zoom level applied when focusing a search result
    #[serde(default = "default_result_zoom")]
    pub result_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_map_lat(),
            center_lon: default_map_lon(),
            zoom: default_map_zoom(),
            result_zoom: default_result_zoom(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_city() -> String {
    "London".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoder_user_agent() -> String {
    format!("weatherboard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_history_path() -> String {
    "data/weather_history.json".to_string()
}

fn default_map_lat() -> f64 {
    51.505
}

fn default_map_lon() -> f64 {
    -0.09
}

fn default_map_zoom() -> u8 {
    13
}

fn default_result_zoom() -> u8 {
    10
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("default_city", default_city())?
            .set_default("units", default_units())?
            .set_default("nominatim_url", default_nominatim_url())?
            .set_default("geocoder_user_agent", default_geocoder_user_agent())?
            .set_default("history_path", default_history_path())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with WEATHERBOARD_)
            // Convert SCREAMING_SNAKE_CASE env vars to snake_case config keys
            .add_source(
                Environment::with_prefix("WEATHERBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_config_defaults_match_dashboard_initial_view() {
        let map = MapConfig::default();
        assert_eq!(map.center_lat, 51.505);
        assert_eq!(map.center_lon, -0.09);
        assert_eq!(map.zoom, 13);
        assert_eq!(map.result_zoom, 10);
    }
}
