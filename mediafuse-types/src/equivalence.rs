//! Immutable snapshots of equivalence-graph components.

use crate::{ContentId, ResourceRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A snapshot of one connected component of the equivalence graph.
///
/// The canonical id is the minimum id across the members, matching the id
/// the merger stamps on its output. The generation is a monotonic stamp
/// derived from the underlying adjacency versions; every member of a
/// component resolves to the same snapshot or an equally-stamped one, with
/// transient divergence during concurrent writes required to converge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceSet {
    canonical: ContentId,
    members: BTreeSet<ResourceRef>,
    generation: u64,
}

impl EquivalenceSet {
    /// Builds a snapshot from a non-empty member set.
    ///
    /// Returns `None` when `members` is empty: a component always contains
    /// at least its own subject.
    #[must_use]
    pub fn new(members: BTreeSet<ResourceRef>, generation: u64) -> Option<Self> {
        let canonical = members.iter().map(ResourceRef::id).min()?;
        Some(Self {
            canonical,
            members,
            generation,
        })
    }

    /// A component containing only `subject` (an id with no asserted edges).
    pub fn singleton(subject: ResourceRef, generation: u64) -> Self {
        Self {
            canonical: subject.id(),
            members: BTreeSet::from([subject]),
            generation,
        }
    }

    /// The canonical (minimum) id of the component.
    #[must_use]
    pub fn canonical(&self) -> ContentId {
        self.canonical
    }

    /// The member refs.
    #[must_use]
    pub fn members(&self) -> &BTreeSet<ResourceRef> {
        &self.members
    }

    /// Member ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ContentId> + '_ {
        self.members.iter().map(ResourceRef::id)
    }

    /// The generation stamp.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if `id` is a member of the component.
    #[must_use]
    pub fn contains(&self, id: ContentId) -> bool {
        self.members.iter().any(|m| m.id() == id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True only for the impossible empty snapshot; kept for symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: u64, source: &str) -> ResourceRef {
        ResourceRef::new(ContentId::new(id), source)
    }

    #[test]
    fn canonical_is_minimum_member_id() {
        let set = EquivalenceSet::new(
            [r(5, "bbc.co.uk"), r(2, "pressassociation.com"), r(10, "ted.com")].into(),
            3,
        )
        .unwrap();
        assert_eq!(set.canonical(), ContentId::new(2));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn empty_member_set_is_rejected() {
        assert!(EquivalenceSet::new(BTreeSet::new(), 0).is_none());
    }

    #[test]
    fn singleton_canonicalises_to_itself() {
        let set = EquivalenceSet::singleton(r(7, "bbc.co.uk"), 0);
        assert_eq!(set.canonical(), ContentId::new(7));
        assert!(set.contains(ContentId::new(7)));
        assert!(!set.contains(ContentId::new(8)));
    }
}
