pub mod analytics_responses;
pub mod dashboard_route;
