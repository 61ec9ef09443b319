use complaint_store::{Category, Complaint, Department, Priority, Status};
use serde::Serialize;
use similarity_engine::SimilarityResult;

/// Response payload for POST /api/complaints/submit.
#[derive(Debug, Serialize)]
pub struct SubmitComplaintResponse {
    pub complaint_id: String,
    pub status: Status,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub assigned_department: Department,
    pub is_duplicate: bool,
    pub related_complaints: Vec<String>,
    /// Present when duplicate linkage could not be persisted; the complaint
    /// itself was still accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_warning: Option<String>,
    pub message: String,
}

/// Response payload for GET /api/complaints/{id}/similar.
#[derive(Debug, Serialize)]
pub struct SimilarComplaintsResponse {
    pub complaint_id: String,
    pub similar_complaints: Vec<SimilarityResult>,
}

/// Response payload for GET /api/complaints/user/{user_id}.
#[derive(Debug, Serialize)]
pub struct UserComplaintsResponse {
    pub user_id: String,
    pub total_complaints: usize,
    pub complaints: Vec<Complaint>,
}

/// Confirmation payload for status updates.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub complaint_id: String,
    pub status: Status,
    pub message: String,
}

/// Confirmation payload for citizen verification.
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub complaint_id: String,
    pub verified: bool,
    pub message: String,
}
