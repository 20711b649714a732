//! Property-based tests for the canonical content hash.
//!
//! The contract under test:
//! - structurally identical records produce identical digests, regardless of
//!   the order collection elements were supplied in;
//! - changing any hashable field changes the digest;
//! - process-local fields do not perturb the digest;
//! - a value with no canonical form yields "no hash", never an empty digest.

use chrono::{TimeZone, Utc};
use mediafuse_hash::hash;
use mediafuse_model::{Broadcast, Content, CrewMember, Description, Image, SegmentEvent};
use mediafuse_types::{ChannelId, ContentId};
use proptest::prelude::*;

// =============================================================================
// FIXTURES
// =============================================================================

fn base_description() -> Description {
    Description::new(ContentId::new(101), "bbc.co.uk")
        .with_title("The Blue Planet")
        .with_year(2001)
        .with_genres(["documentary", "nature"])
}

fn episode_fixture() -> Content {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
    let Content::Item(mut item) = Content::episode(base_description()) else {
        unreachable!()
    };
    item.broadcasts = vec![
        Broadcast::new(ChannelId::new(2), start)
            .with_repeat(false)
            .with_alias("crid://bbc.co.uk/b0000001"),
    ];
    item.segment_events = vec![SegmentEvent::new("seg:1", "bbc.co.uk").with_position(1)];
    item.people = vec![CrewMember::new("David Attenborough").with_role("narrator")];
    Content::Item(item)
}

fn representative_fixtures() -> Vec<Content> {
    vec![
        episode_fixture(),
        Content::film(base_description()),
        Content::clip(base_description()),
        Content::brand(base_description().with_id(ContentId::new(5))),
        Content::series(base_description(), Some(3)),
    ]
}

// =============================================================================
// FIXTURE CHECK: EVERY MODELLED SHAPE MUST HASH
// =============================================================================

/// The "no hash" escape hatch exists for genuinely unrenderable runtime
/// values. Every shape the model can express out of the box must hash; a
/// `None` here means a field type was added without a canonical rendering.
#[test]
fn every_representative_fixture_hashes() {
    for fixture in representative_fixtures() {
        assert!(
            hash(&fixture).is_some(),
            "fixture of kind {} produced no hash",
            fixture.kind_name()
        );
    }
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn digest_is_stable_across_recomputation() {
    let fixture = episode_fixture();
    assert_eq!(hash(&fixture), hash(&fixture));
}

#[test]
fn collection_insertion_order_does_not_matter() {
    let forward = Content::brand(base_description().with_genres(["a", "b", "c"]));
    let reversed = Content::brand(base_description().with_genres(["c", "b", "a"]));
    assert_eq!(hash(&forward), hash(&reversed));
}

#[test]
fn last_fetched_is_excluded_from_the_digest() {
    let plain = base_description();
    let mut fetched = plain.clone();
    fetched.last_fetched = Some(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());

    assert_eq!(
        hash(&Content::brand(plain)),
        hash(&Content::brand(fetched))
    );
}

#[test]
fn changing_a_scalar_changes_the_digest() {
    let before = Content::brand(base_description());
    let after = Content::brand(base_description().with_title("The Green Planet"));
    assert_ne!(hash(&before), hash(&after));
}

#[test]
fn changing_a_nested_broadcast_flag_changes_the_digest() {
    let before = episode_fixture();
    let Content::Item(mut item) = before.clone() else {
        unreachable!()
    };
    item.broadcasts[0].subtitled = Some(true);
    let after = Content::Item(item);

    assert_ne!(hash(&before), hash(&after));
}

#[test]
fn image_windows_participate_in_the_digest() {
    let until = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
    let before = Content::brand(
        base_description().with_images(vec![Image::new("http://img.example/1.jpg")]),
    );
    let after = Content::brand(base_description().with_images(vec![
        Image::new("http://img.example/1.jpg").with_window(None, Some(until)),
    ]));

    assert_ne!(hash(&before), hash(&after));
}

// =============================================================================
// NO-HASH SEMANTICS
// =============================================================================

#[test]
fn unrenderable_extension_data_yields_no_hash() {
    let mut description = base_description();
    description
        .extra
        .insert("confidence".into(), serde_json::json!(0.87));
    assert_eq!(hash(&Content::brand(description)), None);
}

#[test]
fn integral_extension_data_still_hashes() {
    let mut description = base_description();
    description
        .extra
        .insert("episode_count".into(), serde_json::json!(12));
    assert!(hash(&Content::brand(description)).is_some());
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn title_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ]{1,40}").unwrap()
}

fn genres_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-z]{1,12}").unwrap(), 0..6)
}

proptest! {
    /// A clone hashes identically to its original.
    #[test]
    fn clones_hash_identically(title in title_strategy(), genres in genres_strategy()) {
        let content = Content::brand(
            base_description().with_title(title).with_genres(genres),
        );
        prop_assert_eq!(hash(&content), hash(&content.clone()));
    }

    /// Supplying the genre set in any order produces the same digest.
    #[test]
    fn genre_order_never_matters(mut genres in genres_strategy()) {
        let forward = Content::brand(base_description().with_genres(genres.clone()));
        genres.reverse();
        let reversed = Content::brand(base_description().with_genres(genres));
        prop_assert_eq!(hash(&forward), hash(&reversed));
    }

    /// Distinct titles produce distinct digests.
    #[test]
    fn distinct_titles_produce_distinct_digests(
        first in title_strategy(),
        second in title_strategy(),
    ) {
        prop_assume!(first != second);
        let a = Content::brand(base_description().with_title(first));
        let b = Content::brand(base_description().with_title(second));
        prop_assert_ne!(hash(&a), hash(&b));
    }
}
