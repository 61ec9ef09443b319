//! GET /api/complaints/{id}/similar — ranked related-complaint query.
//!
//! Read-only: re-runs the similarity ranking without flagging or linking.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use complaint_store::ComplaintStore;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::complaints::complaint_responses::SimilarComplaintsResponse,
};

pub async fn similar_complaints(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<SimilarComplaintsResponse>> {
    let complaint = state.store.get(&id).await?.ok_or(AppError::NotFound)?;
    let similar_complaints = state.detector.rank_similar(&complaint).await?;

    Ok(Json(SimilarComplaintsResponse {
        complaint_id: id,
        similar_complaints,
    }))
}
