use complaint_store::Status;
use serde::Deserialize;

/// Query parameters for GET /api/departments/{dept_name}/complaints.
#[derive(Debug, Deserialize)]
pub struct DepartmentComplaintsQuery {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub skip: usize,
}

fn default_limit() -> usize {
    100
}
