use complaint_store::Complaint;
use serde::Serialize;

/// Response payload for GET /api/departments/{dept_name}/complaints.
#[derive(Debug, Serialize)]
pub struct DepartmentComplaintsResponse {
    pub department: &'static str,
    /// Matching complaints before pagination.
    pub total_complaints: usize,
    pub returned_count: usize,
    pub complaints: Vec<Complaint>,
}

/// Response payload for GET /api/departments/{dept_name}/complaints/pending.
#[derive(Debug, Serialize)]
pub struct PendingComplaintsResponse {
    pub department: &'static str,
    pub pending_count: usize,
    pub complaints: Vec<Complaint>,
}
