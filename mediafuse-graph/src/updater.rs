//! The graph updater: applies per-source equivalence assertions.
//!
//! An update replaces everything one source asserts from one id, recomputes
//! connected components within the affected neighbourhood, persists the
//! touched adjacency records under optimistic concurrency and publishes a
//! [`GraphUpdate`] describing the membership movement. Merges and splits
//! are both ordinary outcomes.
//!
//! Updates touching disjoint neighbourhoods run fully in parallel; only
//! overlapping neighbourhoods contend, and contention is resolved by
//! re-running the whole update a bounded number of times.

use crate::components::components;
use crate::{GraphError, GraphResult};
use mediafuse_storage::{AdjacencyStore, StorageError, UpdateSink};
use mediafuse_types::{
    Adjacents, ComponentChange, ContentId, GraphUpdate, ResourceRef, Source,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Tuning for the graph updater.
///
/// Both bounds are operational parameters with conservative defaults;
/// neither is hard-coded at a call site.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Upper bound on the ids fetched while closing an update's
    /// neighbourhood. Exceeding it rejects the assertion with
    /// [`GraphError::TooLarge`] rather than silently truncating.
    pub max_neighbourhood: usize,
    /// How many times a conflicted update is re-run before surfacing
    /// [`GraphError::ConcurrencyConflict`].
    pub max_write_retries: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_neighbourhood: 200,
            max_write_retries: 5,
        }
    }
}

/// Applies equivalence assertions to the stored graph.
pub struct GraphUpdater {
    store: Arc<dyn AdjacencyStore>,
    sink: Arc<dyn UpdateSink>,
    config: GraphConfig,
}

impl GraphUpdater {
    /// Creates an updater with default tuning.
    pub fn new(store: Arc<dyn AdjacencyStore>, sink: Arc<dyn UpdateSink>) -> Self {
        Self::with_config(store, sink, GraphConfig::default())
    }

    /// Creates an updater with explicit tuning.
    pub fn with_config(
        store: Arc<dyn AdjacencyStore>,
        sink: Arc<dyn UpdateSink>,
        config: GraphConfig,
    ) -> Self {
        Self {
            store,
            sink,
            config,
        }
    }

    /// Replaces the edges `source` asserts from `subject` with `asserted`.
    ///
    /// Edges asserted by other sources on the same id are untouched:
    /// equivalence is additive per source, never globally overwritten by one
    /// caller. Self-loops in `asserted` are ignored. An assertion matching
    /// the stored state returns a no-op update and publishes nothing.
    ///
    /// On an optimistic conflict the whole update — fetch, recompute,
    /// persist — is re-run; exhausting the retry budget surfaces
    /// [`GraphError::ConcurrencyConflict`] so the caller can retry rather
    /// than silently dropping the assertion.
    pub async fn update(
        &self,
        subject: ResourceRef,
        mut asserted: BTreeSet<ResourceRef>,
        source: &Source,
    ) -> GraphResult<GraphUpdate> {
        asserted.remove(&subject);

        let mut attempts = 0;
        loop {
            match self.try_update(&subject, &asserted, source).await {
                Ok(update) => {
                    if !update.is_noop() {
                        debug!(%subject, %source, changes = update.changes.len(),
                            "graph update applied");
                        self.sink.publish(update.clone());
                    }
                    return Ok(update);
                }
                Err(GraphError::Storage(StorageError::VersionConflict { id })) => {
                    attempts += 1;
                    if attempts > self.config.max_write_retries {
                        return Err(GraphError::ConcurrencyConflict {
                            retries: self.config.max_write_retries,
                        });
                    }
                    debug!(%subject, conflicted = %id, attempt = attempts,
                        "optimistic write lost its race; re-running update");
                }
                Err(other) => return Err(other),
            }
        }
    }

    async fn try_update(
        &self,
        subject: &ResourceRef,
        asserted: &BTreeSet<ResourceRef>,
        source: &Source,
    ) -> GraphResult<GraphUpdate> {
        let Neighbourhood { records, refs } = self.fetch_neighbourhood(subject, asserted).await?;

        let subject_record = &records[&subject.id()].0;
        let previous: BTreeSet<ResourceRef> = subject_record
            .outgoing_for(source)
            .cloned()
            .unwrap_or_default();
        let removed: BTreeSet<ResourceRef> = previous.difference(asserted).cloned().collect();

        // Apply the per-source delta on copies. Incoming mirrors are written
        // for the full asserted set, not just the delta, so an update whose
        // earlier run persisted the subject but lost the race on a mirror
        // heals on retry instead of short-circuiting.
        let mut updated: HashMap<ContentId, Adjacents> = records
            .iter()
            .map(|(id, (adjacents, _))| (*id, adjacents.clone()))
            .collect();
        if let Some(record) = updated.get_mut(&subject.id()) {
            record.set_outgoing(source.clone(), asserted.clone());
        }
        for target in asserted {
            if let Some(record) = updated.get_mut(&target.id()) {
                record.add_incoming(source.clone(), subject.clone());
            }
        }
        for target in &removed {
            if let Some(record) = updated.get_mut(&target.id()) {
                record.remove_incoming(source, subject);
            }
        }

        let changed: BTreeSet<ContentId> = updated
            .iter()
            .filter(|(id, record)| records[id].0 != **record)
            .map(|(id, _)| *id)
            .collect();
        if changed.is_empty() {
            debug!(%subject, %source, "assertion matches stored state; nothing to do");
            return Ok(GraphUpdate::new(subject.clone(), source.clone(), Vec::new()));
        }

        let ids: BTreeSet<ContentId> = records.keys().copied().collect();
        let before = components(
            &ids,
            undirected_edges(records.values().map(|(adjacents, _)| adjacents)),
        );
        let after = components(&ids, undirected_edges(updated.values()));
        let changes = membership_changes(&before, &after, &refs);

        // Touched records persist in ascending id order.
        for id in &changed {
            let expected = records[id].1;
            self.store.persist(updated[id].clone(), expected).await?;
        }

        Ok(GraphUpdate::new(subject.clone(), source.clone(), changes))
    }

    /// Follows edges — stored and newly asserted — outward from the subject
    /// until no new ids are discovered, fetching in batched rounds and
    /// failing once the configured bound is crossed.
    async fn fetch_neighbourhood(
        &self,
        subject: &ResourceRef,
        asserted: &BTreeSet<ResourceRef>,
    ) -> GraphResult<Neighbourhood> {
        let mut records: HashMap<ContentId, (Adjacents, Option<u64>)> = HashMap::new();
        let mut refs: BTreeMap<ContentId, ResourceRef> = BTreeMap::new();
        let mut pending: VecDeque<ResourceRef> = VecDeque::new();
        pending.push_back(subject.clone());
        pending.extend(asserted.iter().cloned());

        while !pending.is_empty() {
            let mut batch: BTreeSet<ContentId> = BTreeSet::new();
            while let Some(next) = pending.pop_front() {
                if !records.contains_key(&next.id()) {
                    batch.insert(next.id());
                }
                refs.entry(next.id()).or_insert(next);
            }
            if batch.is_empty() {
                break;
            }

            let size = records.len() + batch.len();
            if size > self.config.max_neighbourhood {
                return Err(GraphError::TooLarge {
                    size,
                    limit: self.config.max_neighbourhood,
                });
            }

            let batch: Vec<ContentId> = batch.into_iter().collect();
            let stored = self.store.adjacents(&batch).await?;
            for id in batch {
                match stored.get(&id) {
                    Some(versioned) => {
                        let adjacents = versioned.adjacents().clone();
                        // The stored subject ref is authoritative for the
                        // id's owning source.
                        refs.insert(id, adjacents.subject().clone());
                        for neighbour in adjacents.neighbours() {
                            if !records.contains_key(&neighbour.id()) {
                                pending.push_back(neighbour);
                            }
                        }
                        records.insert(id, (adjacents, Some(versioned.version())));
                    }
                    None => {
                        let subject_ref = refs[&id].clone();
                        records.insert(id, (Adjacents::new(subject_ref), None));
                    }
                }
            }
        }

        Ok(Neighbourhood { records, refs })
    }
}

/// The fetched closure around one update: each id's adjacency record with
/// its stored version (`None` when the id has no record yet), plus the best
/// known ref per id.
struct Neighbourhood {
    records: HashMap<ContentId, (Adjacents, Option<u64>)>,
    refs: BTreeMap<ContentId, ResourceRef>,
}

fn undirected_edges<'a>(
    records: impl Iterator<Item = &'a Adjacents>,
) -> Vec<(ContentId, ContentId)> {
    records
        .flat_map(|adjacents| {
            let from = adjacents.id();
            adjacents
                .neighbours()
                .into_iter()
                .map(move |to| (from, to.id()))
        })
        .collect()
}

/// Diffs post-update components against their prior membership. A
/// component's prior membership is the pre-update component containing its
/// canonical id.
fn membership_changes(
    before: &[BTreeSet<ContentId>],
    after: &[BTreeSet<ContentId>],
    refs: &BTreeMap<ContentId, ResourceRef>,
) -> Vec<ComponentChange> {
    let mut prior: BTreeMap<ContentId, &BTreeSet<ContentId>> = BTreeMap::new();
    for component in before {
        for id in component {
            prior.insert(*id, component);
        }
    }

    let empty = BTreeSet::new();
    let mut changes = Vec::new();
    for component in after {
        let Some(canonical) = component.first().copied() else {
            continue;
        };
        let previous = prior.get(&canonical).copied().unwrap_or(&empty);
        if previous == component {
            continue;
        }
        changes.push(ComponentChange {
            canonical,
            members: to_refs(component, refs),
            added: to_refs(&(component - previous), refs),
            removed: to_refs(&(previous - component), refs),
        });
    }
    changes
}

fn to_refs(
    ids: &BTreeSet<ContentId>,
    refs: &BTreeMap<ContentId, ResourceRef>,
) -> BTreeSet<ResourceRef> {
    ids.iter().filter_map(|id| refs.get(id).cloned()).collect()
}
