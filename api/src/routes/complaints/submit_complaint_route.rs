//! POST /api/complaints/submit — intake plus synchronous duplicate detection.

use std::sync::Arc;

use axum::{Json, extract::State};
use complaint_store::{ComplaintStore, GeoPoint, NewComplaint};
use similarity_engine::SimilarityError;
use tracing::warn;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::complaints::{
        complaint_requests::SubmitComplaintRequest, complaint_responses::SubmitComplaintResponse,
    },
};

/// Handler: POST /api/complaints/submit
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/complaints/submit \
///   -H 'content-type: application/json' \
///   -d '{"title":"Large pothole on Main Street","description":"Dangerous pothole causing traffic issues","latitude":12.9716,"longitude":77.5946,"category":"pothole"}'
/// ```
pub async fn submit_complaint(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitComplaintRequest>,
) -> AppResult<Json<SubmitComplaintResponse>> {
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    if body.description.trim().is_empty() {
        return Err(AppError::BadRequest("description must not be empty".into()));
    }
    let location = GeoPoint::new(body.latitude, body.longitude);
    if !location.is_valid() {
        return Err(SimilarityError::InvalidGeometry {
            latitude: body.latitude,
            longitude: body.longitude,
        }
        .into());
    }

    let complaint = state
        .store
        .insert(NewComplaint {
            title: body.title,
            description: body.description,
            category: body.category,
            priority: body.priority,
            location,
            address: body.address,
            image_url: body.image_url,
            audio_url: body.audio_url,
            user_id: body.user_id,
        })
        .await?;

    // Detection is best-effort: a failing proximity query must never reject
    // an already-accepted complaint.
    let (outcome, detection_warning) = match state.detector.detect(&complaint).await {
        Ok(outcome) => {
            let warning = outcome.link_warning.clone();
            (Some(outcome), warning)
        }
        Err(err) => {
            warn!("duplicate detection failed for {}: {err}", complaint.id);
            (None, Some(err.to_string()))
        }
    };

    // Re-read: detection may have flagged/linked the stored document.
    let stored = state
        .store
        .get(&complaint.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(SubmitComplaintResponse {
        complaint_id: stored.id,
        status: stored.status,
        category: stored.category,
        priority: stored.priority,
        assigned_department: stored.assigned_department,
        is_duplicate: outcome.as_ref().is_some_and(|o| o.is_duplicate),
        related_complaints: stored.related_complaints,
        detection_warning,
        message: "Complaint registered successfully".into(),
    }))
}
