//! Precedence-ordered merging of equivalent content.
//!
//! Given one provider's record and the other members of its equivalence
//! set, [`merge`] produces the single coherent view an API consumer sees,
//! combining fields under the caller's [`PrecedenceConfig`]. The merge is
//! pure and CPU-bound: it never mutates its inputs and is safe to run fully
//! in parallel across requests.
//!
//! When precedence is disabled for a caller, merging is simply not invoked —
//! raw members are returned instead. That is the caller's choice, not this
//! crate's.

mod config;
mod merger;

pub use config::{PrecedenceConfig, SourcePrecedence};
pub use merger::merge;
