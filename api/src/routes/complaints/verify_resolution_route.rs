//! POST /api/complaints/{id}/verify — citizen confirmation of a resolution.

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
        complaint_requests::VerificationRequest, complaint_responses::VerificationResponse,
    },
};

pub async fn verify_resolution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<VerificationRequest>,
) -> AppResult<Json<VerificationResponse>> {
    let complaint = state
        .store
        .record_verification(&id, &body.user_id, body.verified, body.feedback)
        .await?;

    Ok(Json(VerificationResponse {
        complaint_id: complaint.id,
        verified: complaint.verified_by_citizen,
        message: "Verification recorded successfully".into(),
    }))
}
