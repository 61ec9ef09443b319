pub mod clusters_route;
pub mod heatmap_route;
pub mod map_complaints_route;
pub mod map_requests;
pub mod map_responses;
pub mod nearby_route;
