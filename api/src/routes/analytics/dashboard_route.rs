//! GET /api/analytics/dashboard — counts by category/status/priority plus
//! resolution metrics. Simple in-process tallying over the complaint set.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use complaint_store::{Complaint, ComplaintStore, ListFilter, Status, window_start};
use serde::Deserialize;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::analytics::analytics_responses::{
        DashboardResponse, Overview, ResolutionMetrics, category_label, priority_label,
        status_label,
    },
};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default = "default_days_back")]
    pub days_back: i64,
}

fn default_days_back() -> i64 {
    30
}

fn tally<K: Ord>(complaints: &[Complaint], key: impl Fn(&Complaint) -> Option<K>) -> BTreeMap<K, usize> {
    let mut out = BTreeMap::new();
    for c in complaints {
        if let Some(k) = key(c) {
            *out.entry(k).or_insert(0) += 1;
        }
    }
    out
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let complaints = state.store.list(&ListFilter::default()).await?;

    let since = window_start(query.days_back.max(0));
    let recent_complaints = complaints.iter().filter(|c| c.created_at >= since).count();

    let resolved: Vec<&Complaint> = complaints
        .iter()
        .filter(|c| c.status == Status::Resolved)
        .collect();
    let avg_resolution_time_hours = {
        let durations: Vec<f64> = resolved
            .iter()
            .filter_map(|c| c.resolved_at.map(|r| (r - c.created_at).num_seconds() as f64))
            .collect();
        if durations.is_empty() {
            None
        } else {
            let mean_secs = durations.iter().sum::<f64>() / durations.len() as f64;
            Some((mean_secs / 3600.0 * 100.0).round() / 100.0)
        }
    };
    let verified = resolved.iter().filter(|c| c.verified_by_citizen).count();
    let verification_rate = if resolved.is_empty() {
        0.0
    } else {
        (verified as f64 / resolved.len() as f64 * 10_000.0).round() / 100.0
    };

    Ok(Json(DashboardResponse {
        overview: Overview {
            total_complaints: complaints.len(),
            recent_complaints,
            days_analyzed: query.days_back,
        },
        by_category: tally(&complaints, |c| Some(category_label(c.category))),
        by_status: tally(&complaints, |c| Some(status_label(c.status))),
        by_priority: tally(&complaints, |c| c.priority.map(priority_label)),
        by_department: tally(&complaints, |c| Some(c.assigned_department.name())),
        resolution_metrics: ResolutionMetrics {
            total_resolved: resolved.len(),
            avg_resolution_time_hours,
            verification_rate,
        },
    }))
}
