//! Grid-based clustering of complaint locations for map display.
//!
//! Buckets points into fixed-size cells in a single pass. Identical input
//! always produces identical output.

use std::collections::BTreeMap;

use complaint_store::{Complaint, GeoPoint};
use tracing::debug;

use crate::config::ClusterConfig;
use crate::errors::SimilarityError;
use crate::types::Cluster;

/// Rough meters per degree of latitude; also used for longitude so a cell
/// key depends only on the quantized coordinates, never on neighbors.
const METERS_PER_DEGREE: f64 = 111_320.0;

pub struct ClusterBuilder {
    cfg: ClusterConfig,
}

struct CellAccum {
    lat_sum: f64,
    lng_sum: f64,
    member_ids: Vec<String>,
}

impl ClusterBuilder {
    /// # Errors
    /// Returns `SimilarityError::Config` for a non-positive cell size.
    pub fn new(cfg: ClusterConfig) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Groups complaints by fixed-size grid cell.
    ///
    /// Centroid is the arithmetic mean of member coordinates; singleton
    /// clusters are emitted. Output is ordered by count descending, then by
    /// cell key, so identical input always yields identical output. No
    /// cross-request state; every call recomputes from scratch.
    pub fn cluster(&self, complaints: &[Complaint]) -> Vec<Cluster> {
        let degrees_per_cell = self.cfg.cell_size_meters / METERS_PER_DEGREE;

        let mut cells: BTreeMap<(i64, i64), CellAccum> = BTreeMap::new();
        for complaint in complaints {
            let key = (
                (complaint.location.latitude / degrees_per_cell).floor() as i64,
                (complaint.location.longitude / degrees_per_cell).floor() as i64,
            );
            let cell = cells.entry(key).or_insert_with(|| CellAccum {
                lat_sum: 0.0,
                lng_sum: 0.0,
                member_ids: Vec::new(),
            });
            cell.lat_sum += complaint.location.latitude;
            cell.lng_sum += complaint.location.longitude;
            cell.member_ids.push(complaint.id.clone());
        }

        let mut clusters: Vec<Cluster> = cells
            .into_values()
            .map(|cell| {
                let count = cell.member_ids.len();
                Cluster {
                    centroid: GeoPoint::new(
                        cell.lat_sum / count as f64,
                        cell.lng_sum / count as f64,
                    ),
                    count,
                    member_ids: cell.member_ids,
                }
            })
            .collect();

        // Densest first; BTreeMap order makes the sort stable across calls.
        clusters.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(
            "ClusterBuilder::cluster points={} clusters={}",
            complaints.len(),
            clusters.len()
        );
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use complaint_store::{Category, Department, Status};

    fn complaint_at(id: &str, lat: f64, lng: f64) -> Complaint {
        let now = Utc::now();
        Complaint {
            id: id.into(),
            title: "t".into(),
            description: "d".into(),
            category: Category::Pothole,
            priority: None,
            status: Status::Submitted,
            location: GeoPoint::new(lat, lng),
            address: None,
            image_url: None,
            audio_url: None,
            user_id: None,
            assigned_department: Department::Roads,
            status_history: Vec::new(),
            verified_by_citizen: false,
            verification_feedback: None,
            related_complaints: Vec::new(),
            is_duplicate: false,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    fn builder(cell_size_meters: f64) -> ClusterBuilder {
        ClusterBuilder::new(ClusterConfig { cell_size_meters }).unwrap()
    }

    #[test]
    fn fifteen_points_in_one_cell() {
        // All points within a few meters of each other, 100 m cells.
        let points: Vec<Complaint> = (0..15)
            .map(|i| complaint_at(&format!("c{i}"), 12.97160 + i as f64 * 1e-6, 77.59460))
            .collect();

        let clusters = builder(100.0).cluster(&points);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 15);
        assert_eq!(clusters[0].member_ids.len(), 15);
    }

    #[test]
    fn two_distant_groups_yield_two_clusters() {
        let mut points: Vec<Complaint> = (0..8)
            .map(|i| complaint_at(&format!("a{i}"), 12.9716 + i as f64 * 1e-6, 77.5946))
            .collect();
        // Second group ~1 km north.
        points.extend((0..7).map(|i| complaint_at(&format!("b{i}"), 12.9806 + i as f64 * 1e-6, 77.5946)));

        let clusters = builder(100.0).cluster(&points);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.iter().map(|c| c.count).sum::<usize>(), 15);
        // Densest first.
        assert_eq!(clusters[0].count, 8);
        assert_eq!(clusters[1].count, 7);
    }

    #[test]
    fn singleton_cluster_is_emitted() {
        let points = vec![complaint_at("only", 12.9716, 77.5946)];
        let clusters = builder(100.0).cluster(&points);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 1);
        assert_eq!(clusters[0].member_ids, vec!["only".to_string()]);
    }

    #[test]
    fn centroid_is_mean_of_members() {
        let points = vec![
            complaint_at("a", 10.0000, 20.0000),
            complaint_at("b", 10.0002, 20.0002),
        ];
        let clusters = builder(500.0).cluster(&points);
        assert_eq!(clusters.len(), 1);
        let c = clusters[0].centroid;
        assert!((c.latitude - 10.0001).abs() < 1e-9);
        assert!((c.longitude - 20.0001).abs() < 1e-9);
    }

    #[test]
    fn deterministic_across_calls() {
        let points: Vec<Complaint> = (0..40)
            .map(|i| {
                complaint_at(
                    &format!("c{i}"),
                    12.9 + (i % 7) as f64 * 0.01,
                    77.5 + (i % 5) as f64 * 0.01,
                )
            })
            .collect();

        let b = builder(100.0);
        let first = b.cluster(&points);
        let second = b.cluster(&points);

        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(second.iter()) {
            assert_eq!(x.count, y.count);
            assert_eq!(x.centroid, y.centroid);
            assert_eq!(x.member_ids, y.member_ids);
        }
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(builder(100.0).cluster(&[]).is_empty());
    }
}
