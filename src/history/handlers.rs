use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Past search strings, most recent first
    pub searches: Vec<String>,
}

/// Get the recent-search history
///
/// GET /history
pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let searches = state.history_store.load().await;
    Json(HistoryResponse { searches })
}
