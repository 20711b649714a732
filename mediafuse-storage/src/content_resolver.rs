//! The content record resolver interface.

use crate::StorageResult;
use async_trait::async_trait;
use mediafuse_model::Content;
use mediafuse_types::ContentId;

/// Fetches provider content records by id.
///
/// Resolution returns whatever subset of `ids` the backing store holds;
/// missing members are the caller's policy decision (the read path logs and
/// proceeds without them). Timeouts are imposed by the caller, not here.
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// Resolves the records for `ids`; unknown ids are simply absent from
    /// the result.
    async fn resolve_ids(&self, ids: &[ContentId]) -> StorageResult<Vec<Content>>;
}
