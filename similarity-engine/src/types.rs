//! Ephemeral result types produced per query; never persisted.

use chrono::{DateTime, Utc};
use complaint_store::{GeoPoint, Status};
use serde::Serialize;

/// One scored candidate from a similarity query.
#[derive(Clone, Debug, Serialize)]
pub struct SimilarityResult {
    pub candidate_id: String,
    pub candidate_title: String,
    pub candidate_status: Status,
    pub distance_meters: f64,
    /// Jaccard word-set similarity, in [0, 1].
    pub text_similarity: f64,
    /// 1.0 when categories are identical, else 0.0.
    pub category_match: f64,
    pub overall_similarity: f64,
    pub candidate_created_at: DateTime<Utc>,
}

/// Outcome of a single `detect` invocation.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionOutcome {
    /// Ranked candidates, descending by overall similarity, capped at top-k.
    pub matches: Vec<SimilarityResult>,
    /// Whether the best candidate cleared the duplicate threshold.
    pub is_duplicate: bool,
    /// Set when the bidirectional link update failed after retries; the
    /// similarity computation itself still succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_warning: Option<String>,
}

/// A map-display cluster of complaint locations.
#[derive(Clone, Debug, Serialize)]
pub struct Cluster {
    pub centroid: GeoPoint,
    pub count: usize,
    /// Contributing complaint ids, in input order.
    pub member_ids: Vec<String>,
}
