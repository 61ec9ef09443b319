//! GET /api/complaints/user/{user_id} — a citizen's submission history.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use complaint_store::{ComplaintStore, ListFilter};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::complaints::{
        complaint_requests::UserComplaintsQuery, complaint_responses::UserComplaintsResponse,
    },
};

pub async fn user_complaints(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<UserComplaintsQuery>,
) -> AppResult<Json<UserComplaintsResponse>> {
    let complaints = state
        .store
        .list(&ListFilter {
            user_id: Some(user_id.clone()),
            status: query.status,
            ..ListFilter::default()
        })
        .await?;

    Ok(Json(UserComplaintsResponse {
        user_id,
        total_complaints: complaints.len(),
        complaints,
    }))
}
