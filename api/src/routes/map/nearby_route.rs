//! GET /api/map/nearby — complaints around a point, closest first.
//!
//! Shares the proximity abstraction with duplicate detection; this path has
//! no side effects and no category/time defaults of its own.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use complaint_store::{CandidateFilter, GeoPoint};
use similarity_engine::GeoProximityIndex;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::map::{
        map_requests::NearbyQuery,
        map_responses::{NearbyCenter, NearbyComplaint, NearbyResponse},
    },
};

const MAX_RESULTS: usize = 50;

pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<NearbyResponse>> {
    let center = GeoPoint::new(query.latitude, query.longitude);
    let index = GeoProximityIndex::new(state.store.clone());

    let hits = index
        .query(
            center,
            query.radius_km * 1000.0,
            &CandidateFilter {
                category: query.category,
                ..CandidateFilter::default()
            },
        )
        .await?;

    let complaints: Vec<NearbyComplaint> = hits
        .into_iter()
        .filter(|hit| query.status.is_none_or(|s| hit.complaint.status == s))
        .take(MAX_RESULTS)
        .map(|hit| NearbyComplaint {
            distance_meters: hit.distance_meters,
            complaint: hit.complaint,
        })
        .collect();

    Ok(Json(NearbyResponse {
        center: NearbyCenter {
            latitude: query.latitude,
            longitude: query.longitude,
        },
        radius_km: query.radius_km,
        total_found: complaints.len(),
        complaints,
    }))
}
