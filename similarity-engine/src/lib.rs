//! Duplicate detection and spatial clustering for complaint intake.
//!
//! This crate provides the algorithmic core of the service:
//! - `GeoProximityIndex` — radius queries with defined candidate ordering
//! - `text_similarity` — Jaccard word-set similarity
//! - `score::combine` — weighted spatial/text/category scoring
//! - `DuplicateDetector` — per-complaint detection, flagging and linkage
//! - `ClusterBuilder` — grid-based map clusters
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. Everything except store I/O is pure and deterministic.

mod cluster;
mod config;
mod detect;
mod errors;
mod geo;
mod proximity;
mod score;
mod text;
mod types;

pub use cluster::ClusterBuilder;
pub use config::{ClusterConfig, DetectionConfig, RetryPolicy, SimilarityWeights};
pub use detect::DuplicateDetector;
pub use errors::SimilarityError;
pub use geo::{EARTH_RADIUS_METERS, haversine_meters};
pub use proximity::{GeoProximityIndex, ProximityHit};
pub use score::{combine, spatial_score};
pub use text::{text_similarity, tokenize};
pub use types::{Cluster, DetectionOutcome, SimilarityResult};
