//! Property-based tests for the precedence merger.
//!
//! The properties under test:
//! - merging a singleton is the identity;
//! - the merged output is independent of the order equivalents arrive in;
//! - the merged id is always the minimum id across the whole set, whatever
//!   source holds top precedence.

use chrono::{DateTime, TimeZone, Utc};
use mediafuse_merge::{merge, PrecedenceConfig};
use mediafuse_model::{Content, Description};
use mediafuse_types::ContentId;
use proptest::prelude::*;

const SOURCES: [&str; 3] = ["bbc.co.uk", "pressassociation.com", "ted.com"];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn config() -> PrecedenceConfig {
    PrecedenceConfig::from_sources(SOURCES)
}

/// Brands with distinct ids, random sources and optional titles.
fn records_strategy() -> impl Strategy<Value = Vec<Content>> {
    prop::collection::btree_set(1u64..500, 1..6).prop_flat_map(|ids| {
        let ids: Vec<u64> = ids.into_iter().collect();
        let len = ids.len();
        prop::collection::vec(
            (0usize..SOURCES.len(), prop::option::of("[a-z ]{1,12}")),
            len,
        )
        .prop_map(move |attrs| {
            ids.iter()
                .zip(attrs)
                .map(|(&id, (source_idx, title))| {
                    let mut description =
                        Description::new(ContentId::new(id), SOURCES[source_idx]);
                    if let Some(title) = title {
                        description = description.with_title(title);
                    }
                    Content::brand(description)
                })
                .collect()
        })
    })
}

proptest! {
    /// `merge(x, [], cfg) == x`.
    #[test]
    fn singleton_merge_is_identity(records in records_strategy()) {
        let candidate = &records[0];
        prop_assert_eq!(&merge(candidate, &[], &config(), now()), candidate);
    }

    /// Permuting the equivalents changes nothing about the output.
    #[test]
    fn merge_is_input_order_independent(records in records_strategy(), rotation in 0usize..8) {
        let (candidate, equivalents) = records.split_first().unwrap();

        let reference = merge(candidate, equivalents, &config(), now());

        let mut reversed = equivalents.to_vec();
        reversed.reverse();
        prop_assert_eq!(&merge(candidate, &reversed, &config(), now()), &reference);

        let mut rotated = equivalents.to_vec();
        if !rotated.is_empty() {
            let len = rotated.len();
            rotated.rotate_left(rotation % len);
        }
        prop_assert_eq!(&merge(candidate, &rotated, &config(), now()), &reference);
    }

    /// The merged id is the minimum id across the whole set.
    #[test]
    fn merged_id_is_minimum_across_the_set(records in records_strategy()) {
        let (candidate, equivalents) = records.split_first().unwrap();

        let merged = merge(candidate, equivalents, &config(), now());
        let minimum = records.iter().map(Content::id).min().unwrap();
        prop_assert_eq!(merged.id(), minimum);
    }

    /// Reordering the precedence list never moves the merged id.
    #[test]
    fn merged_id_survives_precedence_rebalancing(records in records_strategy()) {
        let (candidate, equivalents) = records.split_first().unwrap();

        let forward = merge(candidate, equivalents, &config(), now());
        let rebalanced = PrecedenceConfig::from_sources(SOURCES.iter().rev().copied());
        let backward = merge(candidate, equivalents, &rebalanced, now());

        prop_assert_eq!(forward.id(), backward.id());
    }
}
