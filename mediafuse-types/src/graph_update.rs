//! Change events emitted after successful graph writes.
//!
//! Every accepted assertion produces one [`GraphUpdate`] describing how
//! component membership moved. Downstream index and search consumers key
//! their reprocessing off these events rather than re-deriving the graph.

use crate::{ContentId, ResourceRef, Source};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Unique, time-ordered identifier for a graph change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateId(Uuid);

impl UpdateId {
    /// Creates a new event id with the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UpdateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Membership movement for one affected component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentChange {
    /// Canonical (minimum) id of the component after the update.
    pub canonical: ContentId,
    /// Full membership after the update.
    pub members: BTreeSet<ResourceRef>,
    /// Refs that joined relative to the prior membership.
    pub added: BTreeSet<ResourceRef>,
    /// Refs that left relative to the prior membership.
    pub removed: BTreeSet<ResourceRef>,
}

/// The change event published after one successful `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphUpdate {
    /// Time-ordered event id.
    pub id: UpdateId,
    /// The id whose assertions were written.
    pub subject: ResourceRef,
    /// The source whose assertions were replaced.
    pub source: Source,
    /// One entry per affected component. Empty when the assertion was a
    /// no-op against the stored state.
    pub changes: Vec<ComponentChange>,
}

impl GraphUpdate {
    /// Creates an event for an applied assertion.
    pub fn new(subject: ResourceRef, source: Source, changes: Vec<ComponentChange>) -> Self {
        Self {
            id: UpdateId::new(),
            subject,
            source,
            changes,
        }
    }

    /// True when the assertion changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_ids_are_unique() {
        assert_ne!(UpdateId::new(), UpdateId::new());
    }

    #[test]
    fn noop_updates_carry_no_changes() {
        let subject = ResourceRef::new(ContentId::new(1), "bbc.co.uk");
        let update = GraphUpdate::new(subject, Source::new("bbc.co.uk"), Vec::new());
        assert!(update.is_noop());
    }

    #[test]
    fn serialises_round_trip() {
        let subject = ResourceRef::new(ContentId::new(1), "bbc.co.uk");
        let update = GraphUpdate::new(
            subject.clone(),
            Source::new("bbc.co.uk"),
            vec![ComponentChange {
                canonical: ContentId::new(1),
                members: BTreeSet::from([subject.clone()]),
                added: BTreeSet::from([subject]),
                removed: BTreeSet::new(),
            }],
        );
        let json = serde_json::to_string(&update).unwrap();
        let back: GraphUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(update, back);
    }
}
