//! GET /api/complaints/{id} — full complaint document.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use complaint_store::{Complaint, ComplaintStore};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

pub async fn get_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Complaint>> {
    let complaint = state.store.get(&id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(complaint))
}
