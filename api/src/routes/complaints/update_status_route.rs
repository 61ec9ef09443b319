//! PATCH /api/complaints/{id}/status — workflow progression.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use complaint_store::ComplaintStore;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::complaints::{
        complaint_requests::StatusUpdateRequest, complaint_responses::StatusUpdateResponse,
    },
};

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> AppResult<Json<StatusUpdateResponse>> {
    let complaint = state
        .store
        .update_status(&id, body.status, body.updated_by, body.comment)
        .await?;

    Ok(Json(StatusUpdateResponse {
        complaint_id: complaint.id,
        status: complaint.status,
        message: "Status updated successfully".into(),
    }))
}
