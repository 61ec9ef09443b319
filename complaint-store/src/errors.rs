//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for complaint-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No complaint with the given id.
    #[error("complaint not found: {0}")]
    NotFound(String),

    /// Caller is not allowed to perform this mutation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Mutation rejected because the document is in the wrong state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transient backend failure (network, timeout, ...). Safe to retry.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether a retry with backoff can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}
