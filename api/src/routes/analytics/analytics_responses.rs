use std::collections::BTreeMap;

use complaint_store::{Category, Priority, Status};
use serde::Serialize;

/// Stable string labels for tally keys (match the wire enum spellings).
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Pothole => "pothole",
        Category::Garbage => "garbage",
        Category::Streetlight => "streetlight",
        Category::Drainage => "drainage",
        Category::WaterLeakage => "water_leakage",
        Category::PowerOutage => "power_outage",
        Category::Other => "other",
    }
}

pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Submitted => "Submitted",
        Status::Assigned => "Assigned",
        Status::InProgress => "In Progress",
        Status::Resolved => "Resolved",
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
        Priority::Critical => "critical",
    }
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_complaints: usize,
    pub recent_complaints: usize,
    pub days_analyzed: i64,
}

#[derive(Debug, Serialize)]
pub struct ResolutionMetrics {
    pub total_resolved: usize,
    /// Mean created-to-resolved time in hours; absent until something resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_resolution_time_hours: Option<f64>,
    /// Share of resolved complaints confirmed by the citizen, in percent.
    pub verification_rate: f64,
}

/// Response payload for GET /api/analytics/dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub overview: Overview,
    pub by_category: BTreeMap<&'static str, usize>,
    pub by_status: BTreeMap<&'static str, usize>,
    pub by_priority: BTreeMap<&'static str, usize>,
    pub by_department: BTreeMap<&'static str, usize>,
    pub resolution_metrics: ResolutionMetrics,
}
