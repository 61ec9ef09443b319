//! Combines spatial, textual and categorical signals into one score.

use crate::config::SimilarityWeights;

/// Linear decay from 1.0 at the center to 0.0 at the radius boundary.
///
/// A zero or negative radius degrades to 0.0 rather than dividing by zero.
pub fn spatial_score(distance_meters: f64, radius_meters: f64) -> f64 {
    if radius_meters <= 0.0 || !distance_meters.is_finite() {
        return 0.0;
    }
    (1.0 - distance_meters / radius_meters).max(0.0)
}

/// Weighted sum of the three sub-scores, clamped to [0, 1].
pub fn combine(
    distance_meters: f64,
    radius_meters: f64,
    text_similarity: f64,
    category_match: bool,
    weights: &SimilarityWeights,
) -> f64 {
    let spatial = spatial_score(distance_meters, radius_meters);
    let category = if category_match { 1.0 } else { 0.0 };
    let overall =
        weights.spatial * spatial + weights.text * text_similarity + weights.category * category;
    overall.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spatial_endpoints() {
        assert_eq!(spatial_score(0.0, 50.0), 1.0);
        assert_eq!(spatial_score(50.0, 50.0), 0.0);
        assert_eq!(spatial_score(25.0, 50.0), 0.5);
        // Beyond the boundary clamps at zero.
        assert_eq!(spatial_score(75.0, 50.0), 0.0);
    }

    #[test]
    fn zero_radius_degrades_to_zero() {
        assert_eq!(spatial_score(0.0, 0.0), 0.0);
        assert_eq!(spatial_score(10.0, -1.0), 0.0);
    }

    #[test]
    fn documented_formula() {
        let w = SimilarityWeights::default();
        // 0.4 * 0.5 + 0.4 * 0.25 + 0.2 * 1.0
        let overall = combine(25.0, 50.0, 0.25, true, &w);
        assert!((overall - 0.5).abs() < 1e-12, "got {overall}");

        let overall = combine(25.0, 50.0, 0.25, false, &w);
        assert!((overall - 0.3).abs() < 1e-12, "got {overall}");
    }

    #[test]
    fn clamped_to_unit_interval() {
        let heavy = SimilarityWeights {
            spatial: 1.0,
            text: 1.0,
            category: 1.0,
        };
        assert_eq!(combine(0.0, 50.0, 1.0, true, &heavy), 1.0);
        assert_eq!(combine(1e9, 50.0, 0.0, false, &heavy), 0.0);
    }

    #[test]
    fn order_invariant_given_symmetric_inputs() {
        // Distance, text similarity and the category indicator are all
        // symmetric in their operands, so the combined score is too.
        let w = SimilarityWeights::default();
        let ab = combine(30.0, 50.0, 0.4, true, &w);
        let ba = combine(30.0, 50.0, 0.4, true, &w);
        assert_eq!(ab, ba);
    }
}
