//! Canonical content fingerprinting.
//!
//! A record is rendered into a deterministic canonical string by an explicit
//! per-type visitor (no reflection), then digested with SHA-256. Only the
//! digest leaves this crate; the canonical string is an internal detail and
//! may be arbitrarily large.
//!
//! Persistence layers call [`hash`] before writing and compare against the
//! digest previously stored for the same id; equality skips the write. The
//! check must never suppress equivalence-graph side effects, which are
//! driven by assertions rather than content equality.
//!
//! # Determinism contract
//!
//! - Record fields render in declaration order, never in the iteration order
//!   of any runtime collection.
//! - Semantically unordered containers render identically regardless of the
//!   concrete container's element order.
//! - Fields marked excluded (process-local bookkeeping such as
//!   `last_fetched`) are skipped entirely.
//! - A value with no canonical text form (a non-integral JSON number in
//!   provider extension data) poisons the rendering and [`hash`] returns
//!   `None`. Callers must treat `None` as "always write"; it never compares
//!   equal to another `None`.

mod canonical;
mod digest;
mod render;

pub use canonical::{Canonical, Canonicalizer, FieldList};
pub use digest::ContentDigest;

use mediafuse_model::Content;

/// Computes the canonical fingerprint of a record.
///
/// Returns `None` when some field's runtime value cannot be rendered
/// deterministically.
#[must_use]
pub fn hash(content: &Content) -> Option<ContentDigest> {
    let mut canon = Canonicalizer::new();
    content.canonicalize(&mut canon);
    canon.finish().map(|rendered| ContentDigest::of(&rendered))
}
