//! Complaint document model and store abstraction.
//!
//! This crate owns:
//! - The canonical `Complaint` document and its enums
//! - The `ComplaintStore` trait: document reads/writes, candidate scans for
//!   proximity queries, and the atomic dual-document linkage operation
//! - `MemoryComplaintStore`, the in-memory reference backend
//!
//! Persistence engine design is out of scope; the trait is the seam a real
//! document store (e.g. MongoDB with a `2dsphere` index and transactional
//! `$addToSet`) would implement.

mod errors;
mod filters;
mod id;
mod memory;
mod model;

pub use errors::StoreError;
pub use filters::{BoundingBox, CandidateFilter, ListFilter};
pub use memory::MemoryComplaintStore;
pub use model::{
    Category, Complaint, Department, GeoPoint, NewComplaint, Priority, Status, StatusHistory,
};

use chrono::{DateTime, Utc};

/// Store seam for complaint documents.
///
/// All operations are request-scoped; implementations must be safe to share
/// behind an `Arc` across concurrent requests.
#[allow(async_fn_in_trait)]
pub trait ComplaintStore: Send + Sync {
    /// Persists a new complaint and returns the stored document (id assigned).
    async fn insert(&self, new: NewComplaint) -> Result<Complaint, StoreError>;

    /// Fetches a single document. `None` is a normal outcome.
    async fn get(&self, id: &str) -> Result<Option<Complaint>, StoreError>;

    /// Lists documents matching `filter`, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Complaint>, StoreError>;

    /// Unordered candidate scan for proximity queries (category/time/exclusion
    /// pre-filter only; distance math belongs to the caller).
    async fn scan_candidates(&self, filter: &CandidateFilter)
    -> Result<Vec<Complaint>, StoreError>;

    /// Sets a new workflow status, appending to the audit trail. Stamps
    /// `resolved_at` when the new status is `Resolved`.
    async fn update_status(
        &self,
        id: &str,
        status: Status,
        updated_by: Option<String>,
        comment: Option<String>,
    ) -> Result<Complaint, StoreError>;

    /// Citizen verification of a resolved complaint. Fails with `Forbidden`
    /// for non-owners and `Conflict` when the complaint is not yet resolved.
    async fn record_verification(
        &self,
        id: &str,
        user_id: &str,
        verified: bool,
        feedback: Option<String>,
    ) -> Result<Complaint, StoreError>;

    /// Atomically links two complaints both ways (add-to-set on each side).
    /// Idempotent; never leaves a one-sided link.
    async fn apply_linkage(&self, id_a: &str, id_b: &str) -> Result<(), StoreError>;

    /// Flags a complaint as a duplicate of an earlier report. Idempotent.
    async fn mark_duplicate(&self, id: &str) -> Result<(), StoreError>;
}

/// Convenience for time-window filters: `now - days`.
pub fn window_start(days: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::days(days)
}
