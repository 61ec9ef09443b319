//! Radius query wrapper over the complaint store.

use std::sync::Arc;

use complaint_store::{CandidateFilter, Complaint, ComplaintStore, GeoPoint};
use tracing::trace;

use crate::errors::SimilarityError;
use crate::geo::{ensure_valid, haversine_meters};

/// A candidate within the query radius, with its great-circle distance.
#[derive(Clone, Debug)]
pub struct ProximityHit {
    pub complaint: Complaint,
    pub distance_meters: f64,
}

/// Answers "which complaints lie within radius R of point P".
///
/// Pure query wrapper: validates the center, lets the store pre-filter on
/// category/time, computes haversine distances and returns hits ascending by
/// distance. No side effects; re-queryable.
pub struct GeoProximityIndex<S> {
    store: Arc<S>,
}

impl<S: ComplaintStore> GeoProximityIndex<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Runs one radius query.
    ///
    /// The boundary is inclusive: a candidate exactly at `radius_meters` is
    /// part of the result. An empty result is a normal outcome.
    ///
    /// # Errors
    /// `InvalidGeometry` for an out-of-range center (checked before any store
    /// call); `IndexQueryFailed` when the store scan fails.
    pub async fn query(
        &self,
        center: GeoPoint,
        radius_meters: f64,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProximityHit>, SimilarityError> {
        ensure_valid(center)?;

        let candidates = self
            .store
            .scan_candidates(filter)
            .await
            .map_err(SimilarityError::IndexQueryFailed)?;

        let mut hits: Vec<ProximityHit> = candidates
            .into_iter()
            .map(|complaint| {
                let distance_meters = haversine_meters(center, complaint.location);
                ProximityHit {
                    complaint,
                    distance_meters,
                }
            })
            .filter(|hit| hit.distance_meters <= radius_meters)
            .collect();

        // Ascending by distance; created_at then id keep ties deterministic.
        hits.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.complaint.created_at.cmp(&b.complaint.created_at))
                .then_with(|| a.complaint.id.cmp(&b.complaint.id))
        });

        trace!(
            "GeoProximityIndex::query radius={radius_meters} hits={}",
            hits.len()
        );
        Ok(hits)
    }
}
