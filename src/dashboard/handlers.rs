use axum::{extract::State, http::StatusCode, Json};

use super::models::{ClickRequest, SearchRequest};
use super::service::DashboardError;
use super::view::DashboardView;
use crate::AppState;

/// Render the dashboard view (creates the map on first view)
///
/// GET /dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard_service.view().await)
}

/// Run a name-based search and return the updated dashboard.
/// Failures surface in the view's `error` banner, not as an HTTP error.
///
/// POST /dashboard/search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<DashboardView> {
    Json(state.dashboard_service.search(&request.city).await)
}

/// Run the map-click flow and return the updated dashboard
///
/// POST /dashboard/click
pub async fn click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<DashboardView>, DashboardError> {
    let view = state
        .dashboard_service
        .click(request.lat, request.lon)
        .await?;
    Ok(Json(view))
}

/// Dispose the map (the dashboard is no longer shown)
///
/// POST /dashboard/close
pub async fn close(State(state): State<AppState>) -> StatusCode {
    state.dashboard_service.close().await;
    StatusCode::NO_CONTENT
}
