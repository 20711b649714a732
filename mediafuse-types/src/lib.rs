//! Core type definitions for the MediaFuse aggregation engine.
//!
//! Everything that has to be shared between the storage traits, the graph
//! engine and the merger lives here: identifiers, source keys, per-source
//! adjacency records, equivalence-set snapshots and the change events
//! published after graph writes.

mod adjacency;
mod equivalence;
mod graph_update;
mod ids;
mod reference;
mod source;

pub use adjacency::{Adjacents, VersionedAdjacents};
pub use equivalence::EquivalenceSet;
pub use graph_update::{ComponentChange, GraphUpdate, UpdateId};
pub use ids::{ChannelId, ContentId};
pub use reference::ResourceRef;
pub use source::Source;
