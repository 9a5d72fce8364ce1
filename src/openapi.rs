use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dashboard::view::{DashboardView, ForecastCardView, ForecastRowView, WeatherCardView};
use crate::dashboard::{MapState, Marker};
use crate::error::ErrorResponse;
use crate::forecast::models::{DailyForecastGroup, DailyForecastResponse, ForecastResponse};
use crate::forecast::ForecastEntry;
use crate::history::handlers::HistoryResponse;
use crate::weather::{Condition, Coordinates, WeatherSnapshot};

/// OpenAPI documentation for the Weatherboard API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weatherboard API",
        version = "1.0.0",
        description = "A weather lookup dashboard composing OpenWeatherMap current weather and 5-day forecasts with Nominatim geocoding, recent-search history and a marker map."
    ),
    tags(
        (name = "dashboard", description = "Dashboard view, search and map-click flows"),
        (name = "weather", description = "Current weather data"),
        (name = "forecast", description = "5-day/3-hour forecasts, flat and grouped by day"),
        (name = "history", description = "Recent-search history")
    ),
    components(
        schemas(
            ErrorResponse,
            Coordinates,
            Condition,
            WeatherSnapshot,
            ForecastEntry,
            ForecastResponse,
            DailyForecastGroup,
            DailyForecastResponse,
            HistoryResponse,
            DashboardView,
            WeatherCardView,
            ForecastCardView,
            ForecastRowView,
            MapState,
            Marker,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
