//! Error types for the storage layer.

use mediafuse_types::ContentId;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An optimistic write found a version other than the one it read.
    /// Expected under contention; callers re-read and retry.
    #[error("version conflict writing adjacency record {id}")]
    VersionConflict { id: ContentId },

    /// The backing store failed.
    #[error("backend error: {0}")]
    Backend(String),
}
