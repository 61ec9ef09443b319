//! GET /api/map/complaints — complaints as a GeoJSON FeatureCollection.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use complaint_store::{BoundingBox, Complaint, ComplaintStore, ListFilter};
use serde_json::{Value, json};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::map::map_requests::MapComplaintsQuery,
};

/// GeoJSON coordinates are [longitude, latitude].
pub fn to_feature(complaint: &Complaint) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [complaint.location.longitude, complaint.location.latitude],
        },
        "properties": {
            "complaint_id": complaint.id,
            "title": complaint.title,
            "category": complaint.category,
            "status": complaint.status,
            "priority": complaint.priority,
            "created_at": complaint.created_at,
            "image_url": complaint.image_url,
        },
    })
}

pub async fn map_complaints(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapComplaintsQuery>,
) -> AppResult<Json<Value>> {
    // Bounding box applies only when all four edges are present.
    let bbox = match (query.min_lat, query.max_lat, query.min_lng, query.max_lng) {
        (Some(min_lat), Some(max_lat), Some(min_lng), Some(max_lng)) => Some(BoundingBox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }),
        _ => None,
    };

    let complaints = state
        .store
        .list(&ListFilter {
            category: query.category,
            status: query.status,
            bbox,
            ..ListFilter::default()
        })
        .await?;

    let features: Vec<Value> = complaints.iter().map(to_feature).collect();
    Ok(Json(json!({
        "type": "FeatureCollection",
        "features": features,
    })))
}
