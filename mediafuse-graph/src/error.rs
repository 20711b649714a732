//! Error types for the graph engine.

use mediafuse_storage::StorageError;
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur in graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The affected neighbourhood exceeded the configured bound. Fatal for
    /// this update: the assertion is rejected rather than silently
    /// truncated.
    #[error("affected neighbourhood of {size} ids exceeds the configured bound of {limit}")]
    TooLarge { size: usize, limit: usize },

    /// Every retry of an optimistic write lost its race. Retryable by the
    /// caller; the assertion was not applied.
    #[error("graph write still conflicted after {retries} retries")]
    ConcurrencyConflict { retries: usize },

    /// Equivalent-set resolution exceeded the caller's timeout. Retryable;
    /// never to be read as "zero equivalents".
    #[error("equivalent-set resolution timed out after {timeout_ms}ms")]
    ResolutionTimeout { timeout_ms: u64 },

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
