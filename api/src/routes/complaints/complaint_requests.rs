use complaint_store::{Category, Priority, Status};
use serde::Deserialize;

/// Request payload for POST /api/complaints/submit.
///
/// Category and priority come from the caller: AI categorization and media
/// storage are upstream collaborators, this service only keeps their output.
#[derive(Debug, Deserialize)]
pub struct SubmitComplaintRequest {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Category,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request payload for PATCH /api/complaints/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Status,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request payload for POST /api/complaints/{id}/verify.
#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    pub user_id: String,
    pub verified: bool,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Query parameters for GET /api/complaints/user/{user_id}.
#[derive(Debug, Deserialize)]
pub struct UserComplaintsQuery {
    #[serde(default)]
    pub status: Option<Status>,
}
