//! Equivalence graph engine for MediaFuse.
//!
//! Tracks which source-specific ids denote the same real-world entity,
//! incrementally merging and splitting connected components as per-source
//! assertions change.
//!
//! # Components
//!
//! - **Updater**: applies one source's assertions from one id, recomputing
//!   components within the affected neighbourhood only
//! - **Components**: union-find over a fetched id set
//! - **Resolver**: the read path, turning an id into its component's
//!   content records under a caller-supplied timeout
//!
//! # Write path
//!
//! 1. Fetch the subject's adjacency record and close its neighbourhood over
//!    old and new edges, bounded by [`GraphConfig::max_neighbourhood`]
//! 2. Replace the asserting source's edges; other sources are untouched
//! 3. Recompute components within the neighbourhood
//! 4. Persist every touched record under optimistic concurrency, re-running
//!    the whole update on conflict up to
//!    [`GraphConfig::max_write_retries`] times
//! 5. Publish a [`mediafuse_types::GraphUpdate`] describing the movement

mod components;
mod error;
mod resolver;
mod updater;

pub use components::{components, UnionFind};
pub use error::{GraphError, GraphResult};
pub use resolver::{EquivalentsResolver, ResolvedEquivalents};
pub use updater::{GraphConfig, GraphUpdater};
