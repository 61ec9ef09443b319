//! GET /api/map/clusters — grid clusters of complaint hotspots.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use complaint_store::{ComplaintStore, ListFilter};
use similarity_engine::{ClusterBuilder, ClusterConfig};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::map::{map_requests::ClustersQuery, map_responses::ClustersResponse},
};

pub async fn clusters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClustersQuery>,
) -> AppResult<Json<ClustersResponse>> {
    let cfg = match query.cell_size_meters {
        Some(cell_size_meters) => ClusterConfig { cell_size_meters },
        None => state.cluster_cfg,
    };
    // A caller-supplied cell size is request input, not server config.
    let builder = ClusterBuilder::new(cfg).map_err(|err| AppError::BadRequest(err.to_string()))?;

    let complaints = state
        .store
        .list(&ListFilter {
            category: query.category,
            status: query.status,
            ..ListFilter::default()
        })
        .await?;

    let clusters = builder.cluster(&complaints);
    Ok(Json(ClustersResponse {
        total_clusters: clusters.len(),
        clusters,
    }))
}
