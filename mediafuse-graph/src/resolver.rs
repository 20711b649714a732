//! The read path: resolving an id's equivalents for merging.

use crate::{GraphError, GraphResult};
use mediafuse_model::Content;
use mediafuse_storage::{AdjacencyStore, ContentResolver};
use mediafuse_types::{ContentId, EquivalenceSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// One resolved component: the snapshot and whatever member records could
/// be fetched.
#[derive(Debug, Clone)]
pub struct ResolvedEquivalents {
    pub set: EquivalenceSet,
    pub contents: Vec<Content>,
}

/// Resolves the members of an id's component into content records.
pub struct EquivalentsResolver {
    store: Arc<dyn AdjacencyStore>,
    contents: Arc<dyn ContentResolver>,
}

impl EquivalentsResolver {
    pub fn new(store: Arc<dyn AdjacencyStore>, contents: Arc<dyn ContentResolver>) -> Self {
        Self { store, contents }
    }

    /// Resolves `id`'s component and fetches its member records, bounded by
    /// `timeout`.
    ///
    /// Exceeding the timeout is [`GraphError::ResolutionTimeout`] — a
    /// retryable failure, never "zero equivalents". A member that cannot be
    /// fetched is logged and skipped; the caller merges the rest. Returns
    /// `Ok(None)` when the id is unknown to both the graph and the content
    /// store.
    ///
    /// Dropping the returned future cancels resolution before any dependent
    /// work starts; this layer never retries on its own.
    pub async fn resolve(
        &self,
        id: ContentId,
        timeout: Duration,
    ) -> GraphResult<Option<ResolvedEquivalents>> {
        match tokio::time::timeout(timeout, self.resolve_inner(id)).await {
            Ok(resolved) => resolved,
            Err(_) => Err(GraphError::ResolutionTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn resolve_inner(&self, id: ContentId) -> GraphResult<Option<ResolvedEquivalents>> {
        let mut sets = self.store.resolve_sets(&[id]).await?;
        let Some(set) = sets.remove(&id) else {
            // No adjacency record: the id is its own singleton component,
            // provided the content store knows it at all.
            let mut found = self.contents.resolve_ids(&[id]).await?;
            let Some(content) = found.pop() else {
                return Ok(None);
            };
            let set = EquivalenceSet::singleton(content.resource_ref(), 0);
            return Ok(Some(ResolvedEquivalents {
                set,
                contents: vec![content],
            }));
        };

        let member_ids: Vec<ContentId> = set.ids().collect();
        let contents = self.contents.resolve_ids(&member_ids).await?;

        let found: BTreeSet<ContentId> = contents.iter().map(Content::id).collect();
        for missing in member_ids.iter().filter(|member| !found.contains(member)) {
            warn!(%missing, component = %set.canonical(),
                "component member could not be resolved; merging without it");
        }

        Ok(Some(ResolvedEquivalents { set, contents }))
    }
}
