//! The closed content sum type.

use mediafuse_types::{ContentId, ResourceRef, Source};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Broadcast, CrewMember, Description, SegmentEvent};

/// Kind-specific fields of a standalone item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Episode {
        series_number: Option<u32>,
        episode_number: Option<u32>,
    },
    Film {
        release_year: Option<i32>,
    },
    Clip,
}

/// A playable item: an episode, film or clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub description: Description,
    pub kind: ItemKind,
    /// The container (brand or series) this item belongs to, when the
    /// provider asserts one.
    pub container: Option<ContentId>,
    pub broadcasts: Vec<Broadcast>,
    pub segment_events: Vec<SegmentEvent>,
    pub people: Vec<CrewMember>,
}

/// Kind-specific fields of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerKind {
    Brand,
    Series { series_number: Option<u32> },
}

/// A summary reference to a child of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub id: ContentId,
    pub title: Option<String>,
}

/// A grouping of items: a brand or one of its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub description: Description,
    pub kind: ContainerKind,
    /// Children with upcoming broadcasts.
    pub upcoming: Vec<ChildRef>,
    /// Summaries of the container's children.
    pub child_summaries: Vec<ChildRef>,
    /// Currently available children, keyed by child id.
    pub available_content: BTreeMap<ContentId, ChildRef>,
}

/// One provider's version of a content entity.
///
/// The set of kinds is closed: code that combines records dispatches with an
/// exhaustive match, so a future kind is a compile-time gap at every merge
/// site rather than a runtime fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Item(Item),
    Container(Container),
}

impl Content {
    /// An episode item with the given description.
    pub fn episode(description: Description) -> Self {
        Self::Item(Item {
            description,
            kind: ItemKind::Episode {
                series_number: None,
                episode_number: None,
            },
            container: None,
            broadcasts: Vec::new(),
            segment_events: Vec::new(),
            people: Vec::new(),
        })
    }

    /// A film item with the given description.
    pub fn film(description: Description) -> Self {
        Self::Item(Item {
            description,
            kind: ItemKind::Film { release_year: None },
            container: None,
            broadcasts: Vec::new(),
            segment_events: Vec::new(),
            people: Vec::new(),
        })
    }

    /// A clip item with the given description.
    pub fn clip(description: Description) -> Self {
        Self::Item(Item {
            description,
            kind: ItemKind::Clip,
            container: None,
            broadcasts: Vec::new(),
            segment_events: Vec::new(),
            people: Vec::new(),
        })
    }

    /// A brand container with the given description.
    pub fn brand(description: Description) -> Self {
        Self::Container(Container {
            description,
            kind: ContainerKind::Brand,
            upcoming: Vec::new(),
            child_summaries: Vec::new(),
            available_content: BTreeMap::new(),
        })
    }

    /// A series container with the given description.
    pub fn series(description: Description, series_number: Option<u32>) -> Self {
        Self::Container(Container {
            description,
            kind: ContainerKind::Series { series_number },
            upcoming: Vec::new(),
            child_summaries: Vec::new(),
            available_content: BTreeMap::new(),
        })
    }

    /// The descriptive fields shared by every kind.
    #[must_use]
    pub fn description(&self) -> &Description {
        match self {
            Content::Item(item) => &item.description,
            Content::Container(container) => &container.description,
        }
    }

    /// The content id.
    #[must_use]
    pub fn id(&self) -> ContentId {
        self.description().id
    }

    /// The asserting source.
    #[must_use]
    pub fn source(&self) -> &Source {
        &self.description().source
    }

    /// The ref identifying this provider's version.
    #[must_use]
    pub fn resource_ref(&self) -> ResourceRef {
        self.description().resource_ref()
    }

    /// A copy of this record carrying a different externally-visible id.
    #[must_use]
    pub fn with_id(mut self, id: ContentId) -> Self {
        match &mut self {
            Content::Item(item) => item.description.id = id,
            Content::Container(container) => container.description.id = id,
        }
        self
    }

    /// Short kind label for logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Content::Item(item) => match item.kind {
                ItemKind::Episode { .. } => "episode",
                ItemKind::Film { .. } => "film",
                ItemKind::Clip => "clip",
            },
            Content::Container(container) => match container.kind {
                ContainerKind::Brand => "brand",
                ContainerKind::Series { .. } => "series",
            },
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Content::Item(item) => Some(item),
            Content::Container(_) => None,
        }
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Content::Container(container) => Some(container),
            Content::Item(_) => None,
        }
    }
}
