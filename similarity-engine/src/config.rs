//! Detection, scoring and clustering configuration.

use std::time::Duration;

use crate::errors::SimilarityError;

/// Named weights for the combined similarity score.
///
/// Fixed, documented configuration — not adaptively tuned. Operators and
/// tests vary these without touching the scoring algorithm.
#[derive(Clone, Copy, Debug)]
pub struct SimilarityWeights {
    /// Weight of the linear spatial decay sub-score.
    pub spatial: f64,
    /// Weight of the Jaccard text sub-score.
    pub text: f64,
    /// Weight of the category-match indicator.
    pub category: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            spatial: 0.4,
            text: 0.4,
            category: 0.2,
        }
    }
}

impl SimilarityWeights {
    pub fn validate(&self) -> Result<(), SimilarityError> {
        for (name, w) in [
            ("spatial", self.spatial),
            ("text", self.text),
            ("category", self.category),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(SimilarityError::Config(format!(
                    "weight `{name}` must be finite and non-negative, got {w}"
                )));
            }
        }
        if self.spatial + self.text + self.category <= 0.0 {
            return Err(SimilarityError::Config("weights sum to zero".into()));
        }
        Ok(())
    }
}

/// Bounded exponential backoff for transient store failures.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Must be >= 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per attempt after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Configuration for duplicate detection.
#[derive(Clone, Debug)]
pub struct DetectionConfig {
    /// Search radius around the new complaint, in meters.
    pub radius_meters: f64,
    /// Only candidates created within this many days are considered.
    pub time_window_days: i64,
    /// Ranked result cap.
    pub top_k: usize,
    /// Overall-similarity cutoff above which the best candidate is treated
    /// as the same real-world issue.
    pub duplicate_threshold: f64,
    pub weights: SimilarityWeights,
    pub retry: RetryPolicy,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            radius_meters: 50.0,
            time_window_days: 7,
            top_k: 5,
            duplicate_threshold: 0.8,
            weights: SimilarityWeights::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl DetectionConfig {
    /// Validates config values.
    ///
    /// A zero radius is allowed: it degrades to an empty neighborhood and a
    /// zero spatial sub-score rather than an error.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if !self.radius_meters.is_finite() || self.radius_meters < 0.0 {
            return Err(SimilarityError::Config(format!(
                "radius_meters must be finite and non-negative, got {}",
                self.radius_meters
            )));
        }
        if self.time_window_days < 0 {
            return Err(SimilarityError::Config(
                "time_window_days must be non-negative".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(SimilarityError::Config("top_k must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.duplicate_threshold) {
            return Err(SimilarityError::Config(format!(
                "duplicate_threshold must be within [0, 1], got {}",
                self.duplicate_threshold
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(SimilarityError::Config(
                "retry.max_attempts must be >= 1".into(),
            ));
        }
        self.weights.validate()
    }
}

/// Configuration for grid clustering.
#[derive(Clone, Copy, Debug)]
pub struct ClusterConfig {
    /// Edge length of a grid cell, in meters.
    pub cell_size_meters: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cell_size_meters: 100.0,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if !self.cell_size_meters.is_finite() || self.cell_size_meters <= 0.0 {
            return Err(SimilarityError::Config(format!(
                "cell_size_meters must be finite and positive, got {}",
                self.cell_size_meters
            )));
        }
        Ok(())
    }
}
