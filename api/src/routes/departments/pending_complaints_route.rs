//! GET /api/departments/{dept_name}/complaints/pending — unresolved queue.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use complaint_store::{ComplaintStore, ListFilter, Status};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::departments::{
        department_responses::PendingComplaintsResponse, parse_department,
    },
};

/// Pending means anything not yet resolved: Submitted, Assigned, In Progress.
pub async fn pending_complaints(
    State(state): State<Arc<AppState>>,
    Path(dept_name): Path<String>,
) -> AppResult<Json<PendingComplaintsResponse>> {
    let department = parse_department(&dept_name)?;

    let complaints: Vec<_> = state
        .store
        .list(&ListFilter {
            department: Some(department),
            ..ListFilter::default()
        })
        .await?
        .into_iter()
        .filter(|c| c.status != Status::Resolved)
        .collect();

    Ok(Json(PendingComplaintsResponse {
        department: department.name(),
        pending_count: complaints.len(),
        complaints,
    }))
}
