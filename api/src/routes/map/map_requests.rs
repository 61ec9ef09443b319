use complaint_store::{Category, Status};
use serde::Deserialize;

/// Query parameters for GET /api/map/complaints.
#[derive(Debug, Deserialize)]
pub struct MapComplaintsQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub min_lat: Option<f64>,
    #[serde(default)]
    pub max_lat: Option<f64>,
    #[serde(default)]
    pub min_lng: Option<f64>,
    #[serde(default)]
    pub max_lng: Option<f64>,
}

/// Query parameters for GET /api/map/heatmap.
#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default = "default_days_back")]
    pub days_back: i64,
}

fn default_days_back() -> i64 {
    30
}

/// Query parameters for GET /api/map/nearby.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<Status>,
}

fn default_radius_km() -> f64 {
    1.0
}

/// Query parameters for GET /api/map/clusters.
#[derive(Debug, Deserialize)]
pub struct ClustersQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<Status>,
    /// Optional override of the configured grid cell size.
    #[serde(default)]
    pub cell_size_meters: Option<f64>,
}
