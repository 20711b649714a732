//! In-memory reference stores.
//!
//! These carry the exact semantics a production backend must provide —
//! optimistic versioning on the adjacency store, subset resolution on the
//! content resolver — and are what the engine's test suites run against.

use crate::{AdjacencyStore, ContentResolver, StorageError, StorageResult};
use async_trait::async_trait;
use mediafuse_model::Content;
use mediafuse_types::{Adjacents, ContentId, EquivalenceSet, ResourceRef, VersionedAdjacents};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tokio::sync::RwLock;

/// Adjacency store backed by a shared map.
#[derive(Debug, Default)]
pub struct MemoryAdjacencyStore {
    records: RwLock<HashMap<ContentId, VersionedAdjacents>>,
}

impl MemoryAdjacencyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the stored closure from `root`, collecting members and the
    /// highest version seen. Refs that are asserted-to but have no record of
    /// their own are members too; they contribute no version.
    fn closure(
        records: &HashMap<ContentId, VersionedAdjacents>,
        root: ResourceRef,
    ) -> (BTreeSet<ResourceRef>, u64) {
        let mut members = BTreeSet::new();
        let mut generation = 0;
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.id()) {
                continue;
            }
            match records.get(&current.id()) {
                Some(stored) => {
                    generation = generation.max(stored.version());
                    members.insert(stored.adjacents().subject().clone());
                    for neighbour in stored.adjacents().neighbours() {
                        if !seen.contains(&neighbour.id()) {
                            queue.push_back(neighbour);
                        }
                    }
                }
                None => {
                    members.insert(current);
                }
            }
        }

        (members, generation)
    }
}

#[async_trait]
impl AdjacencyStore for MemoryAdjacencyStore {
    async fn adjacents(
        &self,
        ids: &[ContentId],
    ) -> StorageResult<HashMap<ContentId, VersionedAdjacents>> {
        let records = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id).map(|stored| (*id, stored.clone())))
            .collect())
    }

    async fn resolve_sets(
        &self,
        ids: &[ContentId],
    ) -> StorageResult<HashMap<ContentId, EquivalenceSet>> {
        let records = self.records.read().await;
        let mut sets = HashMap::new();
        for id in ids {
            let Some(stored) = records.get(id) else {
                continue;
            };
            let (members, generation) =
                Self::closure(&records, stored.adjacents().subject().clone());
            if let Some(set) = EquivalenceSet::new(members, generation) {
                sets.insert(*id, set);
            }
        }
        Ok(sets)
    }

    async fn persist(
        &self,
        adjacents: Adjacents,
        expected_version: Option<u64>,
    ) -> StorageResult<u64> {
        let mut records = self.records.write().await;
        let id = adjacents.id();
        let current = records.get(&id).map(VersionedAdjacents::version);
        match (current, expected_version) {
            (None, None) => {
                records.insert(id, VersionedAdjacents::new(adjacents, 1));
                Ok(1)
            }
            (Some(stored), Some(expected)) if stored == expected => {
                let next = stored + 1;
                records.insert(id, VersionedAdjacents::new(adjacents, next));
                Ok(next)
            }
            _ => Err(StorageError::VersionConflict { id }),
        }
    }
}

/// Content resolver backed by a shared map.
#[derive(Debug, Default)]
pub struct MemoryContentResolver {
    records: RwLock<HashMap<ContentId, Content>>,
}

impl MemoryContentResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record, keyed by its id.
    pub async fn insert(&self, content: Content) {
        self.records.write().await.insert(content.id(), content);
    }
}

#[async_trait]
impl ContentResolver for MemoryContentResolver {
    async fn resolve_ids(&self, ids: &[ContentId]) -> StorageResult<Vec<Content>> {
        let records = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediafuse_types::Source;

    fn r(id: u64, source: &str) -> ResourceRef {
        ResourceRef::new(ContentId::new(id), source)
    }

    fn linked(subject: ResourceRef, source: &str, targets: &[ResourceRef]) -> Adjacents {
        let mut adjacents = Adjacents::new(subject);
        adjacents.set_outgoing(Source::new(source), targets.iter().cloned().collect());
        adjacents
    }

    #[tokio::test]
    async fn create_then_update_walks_versions() {
        let store = MemoryAdjacencyStore::new();
        let subject = r(1, "bbc.co.uk");

        let v1 = store
            .persist(Adjacents::new(subject.clone()), None)
            .await
            .unwrap();
        assert_eq!(v1, 1);

        let v2 = store
            .persist(linked(subject, "bbc.co.uk", &[r(2, "x")]), Some(1))
            .await
            .unwrap();
        assert_eq!(v2, 2);
    }

    #[tokio::test]
    async fn stale_writes_conflict() {
        let store = MemoryAdjacencyStore::new();
        let subject = r(1, "bbc.co.uk");
        store
            .persist(Adjacents::new(subject.clone()), None)
            .await
            .unwrap();

        // Wrong expected version.
        let err = store
            .persist(Adjacents::new(subject.clone()), Some(7))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { .. }));

        // Create where a record already exists.
        let err = store
            .persist(Adjacents::new(subject), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn resolve_sets_walks_the_stored_closure() {
        let store = MemoryAdjacencyStore::new();
        let a = r(1, "bbc.co.uk");
        let b = r(2, "pressassociation.com");
        let c = r(3, "ted.com");

        // a -> b (bbc), b -> c (pa); c has no record of its own.
        store
            .persist(linked(a.clone(), "bbc.co.uk", &[b.clone()]), None)
            .await
            .unwrap();
        store
            .persist(
                linked(b.clone(), "pressassociation.com", &[c.clone()]),
                None,
            )
            .await
            .unwrap();

        let sets = store.resolve_sets(&[a.id()]).await.unwrap();
        let set = &sets[&a.id()];
        assert_eq!(set.canonical(), ContentId::new(1));
        assert_eq!(set.members(), &BTreeSet::from([a, b, c]));

        // Absent ids are omitted, never empty sets.
        let sets = store.resolve_sets(&[ContentId::new(99)]).await.unwrap();
        assert!(sets.is_empty());
    }

    #[tokio::test]
    async fn resolver_returns_only_known_records() {
        use mediafuse_model::Description;

        let resolver = MemoryContentResolver::new();
        resolver
            .insert(Content::brand(Description::new(
                ContentId::new(1),
                "bbc.co.uk",
            )))
            .await;

        let found = resolver
            .resolve_ids(&[ContentId::new(1), ContentId::new(2)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), ContentId::new(1));
    }
}
