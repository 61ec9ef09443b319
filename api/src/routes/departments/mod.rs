pub mod department_complaints_route;
pub mod department_requests;
pub mod department_responses;
pub mod pending_complaints_route;

use complaint_store::Department;

use crate::error_handler::AppError;

/// Resolves a path segment to a department; unknown names get a 400 that
/// lists the valid options.
pub(crate) fn parse_department(name: &str) -> Result<Department, AppError> {
    Department::parse(name).ok_or_else(|| {
        let valid: Vec<&str> = Department::ALL.iter().map(|d| d.name()).collect();
        AppError::BadRequest(format!(
            "invalid department name `{name}`; valid options: {}",
            valid.join(", ")
        ))
    })
}
