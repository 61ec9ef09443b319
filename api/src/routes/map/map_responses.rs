use complaint_store::Complaint;
use serde::Serialize;
use similarity_engine::Cluster;

/// One weighted point for heatmap rendering.
#[derive(Debug, Serialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: u32,
}

/// Response payload for GET /api/map/heatmap.
#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub heatmap_data: Vec<HeatmapPoint>,
    pub total_points: usize,
}

#[derive(Debug, Serialize)]
pub struct NearbyCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// A nearby complaint with its distance from the query center.
#[derive(Debug, Serialize)]
pub struct NearbyComplaint {
    pub distance_meters: f64,
    #[serde(flatten)]
    pub complaint: Complaint,
}

/// Response payload for GET /api/map/nearby.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub center: NearbyCenter,
    pub radius_km: f64,
    pub total_found: usize,
    pub complaints: Vec<NearbyComplaint>,
}

/// Response payload for GET /api/map/clusters.
#[derive(Debug, Serialize)]
pub struct ClustersResponse {
    pub total_clusters: usize,
    pub clusters: Vec<Cluster>,
}
