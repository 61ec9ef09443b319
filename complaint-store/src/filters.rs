//! Filter descriptors for store queries.

use chrono::{DateTime, Utc};

use crate::model::{Category, Department, Status};

/// Pre-filter for proximity candidate scans.
///
/// Distance math is not the store's job; a document-store backend maps this
/// to an indexed query (category + created_at) and the caller computes
/// great-circle distances over the result.
#[derive(Clone, Debug, Default)]
pub struct CandidateFilter {
    pub category: Option<Category>,
    pub min_created_at: Option<DateTime<Utc>>,
    /// Id to leave out (the complaint being matched against).
    pub exclude_id: Option<String>,
}

/// Bounding box in degrees, inclusive on all edges.
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// General listing filter for read views (map, analytics, user history).
#[derive(Clone, Debug, Default)]
pub struct ListFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub department: Option<Department>,
    pub user_id: Option<String>,
    pub bbox: Option<BoundingBox>,
    pub min_created_at: Option<DateTime<Utc>>,
}
