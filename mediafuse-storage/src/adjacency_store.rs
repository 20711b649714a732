//! The equivalence-graph store interface.

use crate::StorageResult;
use async_trait::async_trait;
use mediafuse_types::{Adjacents, ContentId, EquivalenceSet, VersionedAdjacents};
use std::collections::HashMap;

/// Persistent home of the equivalence graph's per-id adjacency records.
///
/// Writes are optimistic: every stored record carries a version, and a
/// write names the version it read. Updates touching disjoint neighbourhoods
/// proceed fully in parallel; there is no global graph lock.
#[async_trait]
pub trait AdjacencyStore: Send + Sync {
    /// Fetches the stored adjacency records for `ids`. Ids with no stored
    /// record are omitted from the result.
    async fn adjacents(
        &self,
        ids: &[ContentId],
    ) -> StorageResult<HashMap<ContentId, VersionedAdjacents>>;

    /// Resolves the component snapshot each of `ids` belongs to. Ids with
    /// no stored record are omitted; callers treat absence as a singleton.
    async fn resolve_sets(
        &self,
        ids: &[ContentId],
    ) -> StorageResult<HashMap<ContentId, EquivalenceSet>>;

    /// Persists an adjacency record, accepting the write only if the stored
    /// version still equals `expected_version` (`None` expects no record to
    /// exist yet). Returns the new version on success and
    /// [`StorageError::VersionConflict`](crate::StorageError::VersionConflict)
    /// when the record moved underneath the caller.
    async fn persist(
        &self,
        adjacents: Adjacents,
        expected_version: Option<u64>,
    ) -> StorageResult<u64>;
}
