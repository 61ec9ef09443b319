use std::sync::Arc;

use complaint_store::MemoryComplaintStore;
use similarity_engine::{ClusterConfig, DetectionConfig, DuplicateDetector, SimilarityError};
use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },

    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub store: Arc<MemoryComplaintStore>,
    pub detector: DuplicateDetector<MemoryComplaintStore>,
    pub cluster_cfg: ClusterConfig,
}

impl AppState {
    /// Load shared state from environment variables; unset variables fall
    /// back to the documented defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let detection = DetectionConfig {
            radius_meters: env_parse("DETECT_RADIUS_METERS", 50.0)?,
            time_window_days: env_parse("DETECT_TIME_WINDOW_DAYS", 7)?,
            top_k: env_parse("DETECT_TOP_K", 5)?,
            duplicate_threshold: env_parse("DETECT_DUPLICATE_THRESHOLD", 0.8)?,
            ..DetectionConfig::default()
        };

        let cluster_cfg = ClusterConfig {
            cell_size_meters: env_parse("CLUSTER_CELL_SIZE_METERS", 100.0)?,
        };
        cluster_cfg.validate()?;

        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), detection)?;

        Ok(Self {
            store,
            detector,
            cluster_cfg,
        })
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}
