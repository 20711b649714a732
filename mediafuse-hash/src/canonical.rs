//! Deterministic rendering of values into canonical strings.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

/// A value that can render itself into a canonical string.
///
/// Implementations must be deterministic: the rendering of a value may
/// depend only on the value itself, never on iteration order, addresses or
/// process state.
pub trait Canonical {
    fn canonicalize(&self, canon: &mut Canonicalizer);
}

/// Accumulates the canonical rendering of one record.
///
/// Rendering grammar:
///
/// - scalar: `TypeName: { value }`
/// - record: `TypeName: { field1 | field2 | ... }`, fields in declaration
///   order
/// - collection: `TypeName: { { elem1, elem2, ... } }`, elements sorted by
///   rendering when the container is semantically unordered
/// - map: `TypeName: { { key/value, ... } }`, entries sorted by rendering
/// - absent value: `()`
///
/// A value with no canonical form calls [`Canonicalizer::poison`]; a
/// poisoned rendering yields no output from [`Canonicalizer::finish`].
#[derive(Debug, Default)]
pub struct Canonicalizer {
    out: String,
    poisoned: bool,
}

impl Canonicalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a scalar as `TypeName: { value }`.
    pub fn scalar(&mut self, type_name: &str, value: impl fmt::Display) {
        let _ = write!(self.out, "{type_name}: {{ {value} }}");
    }

    /// Renders the fixed placeholder for an absent value.
    pub fn absent(&mut self) {
        self.out.push_str("()");
    }

    /// Marks the whole rendering as non-canonical.
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Renders a record with fields in the order `build` emits them.
    pub fn record(&mut self, type_name: &str, build: impl FnOnce(&mut FieldList<'_>)) {
        let _ = write!(self.out, "{type_name}: {{ ");
        build(&mut FieldList {
            canon: self,
            first: true,
        });
        self.out.push_str(" }");
    }

    /// Renders a semantically unordered collection: elements are rendered
    /// independently, sorted by their rendering, then joined. Identical for
    /// any iteration order of the underlying container.
    pub fn unordered<'a, T, I>(&mut self, type_name: &str, elems: I)
    where
        T: Canonical + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut rendered: Vec<String> = elems
            .into_iter()
            .map(|elem| self.render_child(elem))
            .collect();
        rendered.sort_unstable();
        self.write_group(type_name, &rendered);
    }

    /// Renders an ordered collection, preserving element order.
    pub fn ordered<'a, T, I>(&mut self, type_name: &str, elems: I)
    where
        T: Canonical + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let rendered: Vec<String> = elems
            .into_iter()
            .map(|elem| self.render_child(elem))
            .collect();
        self.write_group(type_name, &rendered);
    }

    /// Renders a map as sorted `key/value` entries.
    pub fn map<'a, K, V, I>(&mut self, type_name: &str, entries: I)
    where
        K: Canonical + 'a,
        V: Canonical + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        let mut rendered: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| {
                let key = self.render_child(key);
                let value = self.render_child(value);
                format!("{key}/{value}")
            })
            .collect();
        rendered.sort_unstable();
        self.write_group(type_name, &rendered);
    }

    /// Returns the canonical string, or `None` when poisoned.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        if self.poisoned { None } else { Some(self.out) }
    }

    fn render_child<T: Canonical + ?Sized>(&mut self, value: &T) -> String {
        let mut child = Canonicalizer::new();
        value.canonicalize(&mut child);
        if child.poisoned {
            self.poisoned = true;
        }
        child.out
    }

    fn write_group(&mut self, type_name: &str, rendered: &[String]) {
        let _ = write!(self.out, "{type_name}: {{ {{ {} }} }}", rendered.join(", "));
    }
}

/// Field emitter handed to [`Canonicalizer::record`] callbacks.
pub struct FieldList<'a> {
    canon: &'a mut Canonicalizer,
    first: bool,
}

impl FieldList<'_> {
    /// Emits the next field, in declaration order.
    pub fn field<T: Canonical + ?Sized>(&mut self, value: &T) -> &mut Self {
        if !self.first {
            self.canon.out.push_str(" | ");
        }
        self.first = false;
        value.canonicalize(self.canon);
        self
    }
}

// ---------------------------------------------------------------------------
// Primitive renderings
// ---------------------------------------------------------------------------

impl<T: Canonical + ?Sized> Canonical for &T {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        (**self).canonicalize(canon);
    }
}

macro_rules! canonical_integer {
    ($($ty:ty),*) => {
        $(impl Canonical for $ty {
            fn canonicalize(&self, canon: &mut Canonicalizer) {
                canon.scalar("Integer", self);
            }
        })*
    };
}

canonical_integer!(u8, u16, u32, u64, usize, i32, i64);

impl Canonical for bool {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Boolean", self);
    }
}

impl Canonical for str {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Text", self);
    }
}

impl Canonical for String {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        self.as_str().canonicalize(canon);
    }
}

impl Canonical for DateTime<Utc> {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Instant", self.timestamp_millis());
    }
}

impl Canonical for NaiveDate {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Date", self);
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        match self {
            Some(value) => value.canonicalize(canon),
            None => canon.absent(),
        }
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.ordered("List", self.iter());
    }
}

impl<T: Canonical> Canonical for BTreeSet<T> {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.unordered("Set", self.iter());
    }
}

impl<K: Canonical, V: Canonical> Canonical for BTreeMap<K, V> {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.map("Map", self.iter());
    }
}

impl Canonical for serde_json::Value {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        match self {
            serde_json::Value::Null => canon.absent(),
            serde_json::Value::Bool(value) => value.canonicalize(canon),
            serde_json::Value::Number(number) => {
                // Integral numbers have one canonical text form; arbitrary
                // floats do not, and rendering them would tie the digest to
                // formatting behaviour.
                if let Some(value) = number.as_i64() {
                    value.canonicalize(canon);
                } else if let Some(value) = number.as_u64() {
                    value.canonicalize(canon);
                } else {
                    canon.poison();
                }
            }
            serde_json::Value::String(value) => value.canonicalize(canon),
            serde_json::Value::Array(values) => canon.ordered("Array", values.iter()),
            serde_json::Value::Object(entries) => {
                let entries: Vec<(&String, &serde_json::Value)> = entries.iter().collect();
                canon.map("Object", entries.into_iter());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars_render_with_type_names() {
        let mut canon = Canonicalizer::new();
        42u32.canonicalize(&mut canon);
        assert_eq!(canon.finish().unwrap(), "Integer: { 42 }");
    }

    #[test]
    fn records_join_fields_in_emission_order() {
        let mut canon = Canonicalizer::new();
        canon.record("Pair", |fields| {
            fields.field("left").field(&1u32);
        });
        assert_eq!(
            canon.finish().unwrap(),
            "Pair: { Text: { left } | Integer: { 1 } }"
        );
    }

    #[test]
    fn unordered_rendering_is_independent_of_input_order() {
        let forward = {
            let mut canon = Canonicalizer::new();
            canon.unordered("Set", ["a", "b", "c"].iter());
            canon.finish().unwrap()
        };
        let reversed = {
            let mut canon = Canonicalizer::new();
            canon.unordered("Set", ["c", "b", "a"].iter());
            canon.finish().unwrap()
        };
        assert_eq!(forward, reversed);
    }

    #[test]
    fn ordered_rendering_preserves_input_order() {
        let forward = {
            let mut canon = Canonicalizer::new();
            canon.ordered("List", ["a", "b"].iter());
            canon.finish().unwrap()
        };
        let reversed = {
            let mut canon = Canonicalizer::new();
            canon.ordered("List", ["b", "a"].iter());
            canon.finish().unwrap()
        };
        assert_ne!(forward, reversed);
    }

    #[test]
    fn absent_values_render_as_placeholder() {
        let mut canon = Canonicalizer::new();
        None::<u32>.canonicalize(&mut canon);
        assert_eq!(canon.finish().unwrap(), "()");
    }

    #[test]
    fn non_integral_json_numbers_poison_the_rendering() {
        let mut canon = Canonicalizer::new();
        serde_json::json!({ "weighting": 0.5 }).canonicalize(&mut canon);
        assert!(canon.finish().is_none());
    }

    #[test]
    fn poison_propagates_out_of_nested_collections() {
        let mut canon = Canonicalizer::new();
        let values = vec![serde_json::json!(1), serde_json::json!(2.5)];
        values.canonicalize(&mut canon);
        assert!(canon.finish().is_none());
    }
}
