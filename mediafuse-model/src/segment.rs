//! Segment events: provider-asserted positions of segments within an item.

use mediafuse_types::Source;
use serde::{Deserialize, Serialize};

/// One provider's placement of a segment within an item's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEvent {
    /// Provider URI for the segment occurrence.
    pub uri: String,
    /// The source asserting the placement.
    pub source: Source,
    /// Ordinal position within the item, where the provider supplies one.
    pub position: Option<u32>,
    /// Offset from the start of the item, in milliseconds.
    pub offset_millis: Option<u64>,
    /// Segment duration, in milliseconds.
    pub duration_millis: Option<u64>,
    pub title: Option<String>,
}

impl SegmentEvent {
    /// Creates a segment event with only its identity set.
    pub fn new(uri: impl Into<String>, source: impl Into<Source>) -> Self {
        Self {
            uri: uri.into(),
            source: source.into(),
            position: None,
            offset_millis: None,
            duration_millis: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}
