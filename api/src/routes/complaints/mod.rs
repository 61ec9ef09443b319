pub mod complaint_requests;
pub mod complaint_responses;
pub mod get_complaint_route;
pub mod similar_complaints_route;
pub mod submit_complaint_route;
pub mod update_status_route;
pub mod user_complaints_route;
pub mod verify_resolution_route;
