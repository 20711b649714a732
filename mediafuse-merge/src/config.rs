//! Per-caller precedence configuration.

use mediafuse_model::Content;
use mediafuse_types::Source;
use serde::{Deserialize, Serialize};

/// One entry in the precedence ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePrecedence {
    pub source: Source,
    pub enabled: bool,
}

/// The ranked, enable/disable source list one caller merges under.
///
/// Owned by the caller (one per application), built once at startup and
/// read-only per request. There is deliberately no process-wide default:
/// every merge names the configuration it runs under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceConfig {
    ordering: Vec<SourcePrecedence>,
    image_precedence: bool,
    people_precedence: bool,
    /// Sources trusted for content-hierarchy assertions (an item's parent
    /// container), ranked. Falls back to the main ordering when unset.
    hierarchy_precedence: Option<Vec<Source>>,
}

impl PrecedenceConfig {
    /// Creates a config ranking `sources` from most to least precedent, all
    /// enabled, with image and people precedence on.
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        Self {
            ordering: sources
                .into_iter()
                .map(|source| SourcePrecedence {
                    source: source.into(),
                    enabled: true,
                })
                .collect(),
            image_precedence: true,
            people_precedence: true,
            hierarchy_precedence: None,
        }
    }

    /// Appends a source at the lowest-precedence position.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Source>, enabled: bool) -> Self {
        self.ordering.push(SourcePrecedence {
            source: source.into(),
            enabled,
        });
        self
    }

    #[must_use]
    pub fn with_image_precedence(mut self, enabled: bool) -> Self {
        self.image_precedence = enabled;
        self
    }

    #[must_use]
    pub fn with_people_precedence(mut self, enabled: bool) -> Self {
        self.people_precedence = enabled;
        self
    }

    #[must_use]
    pub fn with_hierarchy_precedence(mut self, sources: Vec<Source>) -> Self {
        self.hierarchy_precedence = Some(sources);
        self
    }

    #[must_use]
    pub fn image_precedence(&self) -> bool {
        self.image_precedence
    }

    #[must_use]
    pub fn people_precedence(&self) -> bool {
        self.people_precedence
    }

    #[must_use]
    pub fn hierarchy_precedence(&self) -> Option<&[Source]> {
        self.hierarchy_precedence.as_deref()
    }

    /// The rank of an enabled source; `None` for disabled or unknown
    /// sources. Lower is more precedent.
    #[must_use]
    pub fn rank(&self, source: &Source) -> Option<usize> {
        self.ordering
            .iter()
            .position(|entry| &entry.source == source && entry.enabled)
    }

    #[must_use]
    pub fn is_enabled(&self, source: &Source) -> bool {
        self.rank(source).is_some()
    }

    /// Sorts records into precedence order, dropping those from disabled or
    /// unknown sources. The order is fully deterministic — rank, then id —
    /// so any permutation of the input yields the same output.
    #[must_use]
    pub fn sort_equivalents(&self, equivalents: &[Content]) -> Vec<Content> {
        let mut ranked: Vec<(usize, Content)> = equivalents
            .iter()
            .filter_map(|content| {
                self.rank(content.source())
                    .map(|rank| (rank, content.clone()))
            })
            .collect();
        ranked.sort_by_key(|(rank, content)| (*rank, content.id()));
        ranked.into_iter().map(|(_, content)| content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediafuse_model::Description;
    use mediafuse_types::ContentId;

    fn brand(id: u64, source: &str) -> Content {
        Content::brand(Description::new(ContentId::new(id), source))
    }

    #[test]
    fn rank_follows_declaration_order() {
        let config = PrecedenceConfig::from_sources(["bbc.co.uk", "pressassociation.com"]);
        assert_eq!(config.rank(&Source::new("bbc.co.uk")), Some(0));
        assert_eq!(config.rank(&Source::new("pressassociation.com")), Some(1));
        assert_eq!(config.rank(&Source::new("ted.com")), None);
    }

    #[test]
    fn disabled_sources_have_no_rank() {
        let config =
            PrecedenceConfig::from_sources(["bbc.co.uk"]).with_source("ted.com", false);
        assert!(!config.is_enabled(&Source::new("ted.com")));
        assert_eq!(config.rank(&Source::new("ted.com")), None);
    }

    #[test]
    fn sort_drops_unknown_and_orders_by_rank_then_id() {
        let config = PrecedenceConfig::from_sources(["bbc.co.uk", "pressassociation.com"]);
        let sorted = config.sort_equivalents(&[
            brand(9, "pressassociation.com"),
            brand(4, "unknown.example"),
            brand(7, "bbc.co.uk"),
            brand(3, "bbc.co.uk"),
        ]);

        let ids: Vec<u64> = sorted.iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn sort_is_permutation_invariant() {
        let config = PrecedenceConfig::from_sources(["bbc.co.uk", "pressassociation.com"]);
        let records = [
            brand(9, "pressassociation.com"),
            brand(7, "bbc.co.uk"),
            brand(3, "bbc.co.uk"),
        ];
        let mut permuted = records.to_vec();
        permuted.reverse();

        assert_eq!(
            config.sort_equivalents(&records),
            config.sort_equivalents(&permuted)
        );
    }
}
