//! References to one provider's version of an entity.

use crate::{ContentId, Source};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies one provider's version of a content entity.
///
/// Equality, ordering and hashing are by `id` alone: an id is minted for
/// exactly one source, so the source is descriptive payload rather than part
/// of the identity. This is what lets edge sets and component members be
/// keyed by id without caring which side of an assertion supplied the ref.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
    id: ContentId,
    source: Source,
}

impl ResourceRef {
    /// Creates a reference from an id and the source that owns it.
    pub fn new(id: ContentId, source: impl Into<Source>) -> Self {
        Self {
            id,
            source: source.into(),
        }
    }

    /// Returns the content id.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Returns the owning source.
    #[must_use]
    pub fn source(&self) -> &Source {
        &self.source
    }
}

impl PartialEq for ResourceRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceRef {}

impl PartialOrd for ResourceRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for ResourceRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_by_id_alone() {
        let a = ResourceRef::new(ContentId::new(7), "bbc.co.uk");
        let b = ResourceRef::new(ContentId::new(7), "pressassociation.com");
        assert_eq!(a, b);

        let mut set = std::collections::BTreeSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn orders_by_id() {
        let lo = ResourceRef::new(ContentId::new(2), "ted.com");
        let hi = ResourceRef::new(ContentId::new(5), "bbc.co.uk");
        assert!(lo < hi);
    }
}
