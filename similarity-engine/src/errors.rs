//! Unified error types for the crate.

use complaint_store::StoreError;
use thiserror::Error;

/// Top-level error for similarity-engine operations.
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// Malformed coordinates; rejected before any store query runs.
    #[error("invalid geometry: lat={latitude}, lng={longitude}")]
    InvalidGeometry { latitude: f64, longitude: f64 },

    /// Proximity query failed after bounded retries.
    #[error("proximity index query failed: {0}")]
    IndexQueryFailed(#[source] StoreError),

    /// Bidirectional link update could not complete after bounded retries.
    #[error("link update failed: {0}")]
    LinkUpdateFailed(#[source] StoreError),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}
