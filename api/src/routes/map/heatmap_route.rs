//! GET /api/map/heatmap — complaint density points for heatmap rendering.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use complaint_store::{ComplaintStore, ListFilter, window_start};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::map::{
        map_requests::HeatmapQuery,
        map_responses::{HeatmapPoint, HeatmapResponse},
    },
};

pub async fn heatmap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> AppResult<Json<HeatmapResponse>> {
    let complaints = state
        .store
        .list(&ListFilter {
            category: query.category,
            min_created_at: Some(window_start(query.days_back.max(0))),
            ..ListFilter::default()
        })
        .await?;

    let heatmap_data: Vec<HeatmapPoint> = complaints
        .iter()
        .map(|c| HeatmapPoint {
            lat: c.location.latitude,
            lng: c.location.longitude,
            // Uniform for now; could be weighted by priority later.
            intensity: 1,
        })
        .collect();

    Ok(Json(HeatmapResponse {
        total_points: heatmap_data.len(),
        heatmap_data,
    }))
}
