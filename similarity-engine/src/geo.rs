//! Great-circle distance and coordinate validation.

use complaint_store::GeoPoint;

use crate::errors::SimilarityError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Rejects out-of-range or non-finite coordinates before any query runs.
pub fn ensure_valid(point: GeoPoint) -> Result<(), SimilarityError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(SimilarityError::InvalidGeometry {
            latitude: point.latitude,
            longitude: point.longitude,
        })
    }
}
