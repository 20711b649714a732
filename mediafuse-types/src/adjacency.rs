//! Per-id adjacency records for the equivalence graph.
//!
//! An [`Adjacents`] holds the equivalence edges around one canonical id:
//! outgoing edges asserted by that id's own writers, and incoming edges
//! asserted by other ids toward it. Both directions are partitioned by the
//! asserting source, so one source's assertions can be replaced wholesale
//! without disturbing what any other source has said. Equivalence is
//! additive per source, never globally overwritten by one caller.

use crate::{ContentId, ResourceRef, Source};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The equivalence edges recorded around one canonical id.
///
/// Self-loops are never stored; an `Adjacents` with no edges at all describes
/// a singleton component of its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacents {
    subject: ResourceRef,
    outgoing: BTreeMap<Source, BTreeSet<ResourceRef>>,
    incoming: BTreeMap<Source, BTreeSet<ResourceRef>>,
}

impl Adjacents {
    /// Creates an edge-free record for `subject`.
    pub fn new(subject: ResourceRef) -> Self {
        Self {
            subject,
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
        }
    }

    /// Returns the subject ref.
    #[must_use]
    pub fn subject(&self) -> &ResourceRef {
        &self.subject
    }

    /// Returns the subject's id.
    #[must_use]
    pub fn id(&self) -> ContentId {
        self.subject.id()
    }

    /// Returns the outgoing edges asserted by `source`, if any.
    #[must_use]
    pub fn outgoing_for(&self, source: &Source) -> Option<&BTreeSet<ResourceRef>> {
        self.outgoing.get(source)
    }

    /// Replaces the outgoing edges asserted by `source`.
    ///
    /// Self-loops are dropped. An empty replacement retracts every edge the
    /// source previously asserted from this id.
    pub fn set_outgoing(&mut self, source: Source, mut refs: BTreeSet<ResourceRef>) {
        refs.remove(&self.subject);
        if refs.is_empty() {
            self.outgoing.remove(&source);
        } else {
            self.outgoing.insert(source, refs);
        }
    }

    /// Records an incoming edge asserted by `source` from another id.
    pub fn add_incoming(&mut self, source: Source, from: ResourceRef) {
        if from == self.subject {
            return;
        }
        self.incoming.entry(source).or_default().insert(from);
    }

    /// Retracts an incoming edge previously asserted by `source`.
    pub fn remove_incoming(&mut self, source: &Source, from: &ResourceRef) {
        if let Some(refs) = self.incoming.get_mut(source) {
            refs.remove(from);
            if refs.is_empty() {
                self.incoming.remove(source);
            }
        }
    }

    /// All outgoing refs across every asserting source.
    #[must_use]
    pub fn outgoing_refs(&self) -> BTreeSet<ResourceRef> {
        self.outgoing.values().flatten().cloned().collect()
    }

    /// All incoming refs across every asserting source.
    #[must_use]
    pub fn incoming_refs(&self) -> BTreeSet<ResourceRef> {
        self.incoming.values().flatten().cloned().collect()
    }

    /// The union of outgoing and incoming refs.
    #[must_use]
    pub fn neighbours(&self) -> BTreeSet<ResourceRef> {
        let mut all = self.outgoing_refs();
        all.extend(self.incoming_refs());
        all
    }

    /// True when no source has asserted any edge around this id.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

/// An [`Adjacents`] record together with its optimistic-concurrency version.
///
/// A write is accepted only if the version read at the start of an update
/// still matches at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedAdjacents {
    adjacents: Adjacents,
    version: u64,
}

impl VersionedAdjacents {
    /// Wraps an adjacency record with its stored version.
    pub fn new(adjacents: Adjacents, version: u64) -> Self {
        Self { adjacents, version }
    }

    /// Returns the adjacency record.
    #[must_use]
    pub fn adjacents(&self) -> &Adjacents {
        &self.adjacents
    }

    /// Returns the stored version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Consumes the wrapper, returning the record and version.
    #[must_use]
    pub fn into_parts(self) -> (Adjacents, u64) {
        (self.adjacents, self.version)
    }
}
