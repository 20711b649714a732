//! Precedence-ordered combination of an equivalence set.

use chrono::{DateTime, Utc};
use mediafuse_model::{
    Broadcast, Container, ContainerKind, Content, CrewMember, Description, Item, ItemKind,
    SegmentEvent,
};
use mediafuse_types::ContentId;

use crate::PrecedenceConfig;

/// Combines `candidate` with its equivalents into one record.
///
/// The merge is a pure function of its arguments: inputs are never mutated,
/// and `now` (used for image availability windows) is explicit so the same
/// inputs always produce the same output.
///
/// The candidate is the record the caller explicitly asked for. It becomes
/// the chosen root when its source ties for top precedence; a
/// lower-precedence explicit request does not override. The merged id is the
/// minimum id across the whole set, keeping externally visible identifiers
/// stable when precedence rebalances which source is on top.
#[must_use]
pub fn merge(
    candidate: &Content,
    equivalents: &[Content],
    config: &PrecedenceConfig,
    now: DateTime<Utc>,
) -> Content {
    let sorted = config.sort_equivalents(equivalents);
    if sorted.is_empty() {
        return candidate.clone();
    }

    // Precedence order over the whole set. The sort is stable and the
    // candidate goes in first, so it wins any tie for its rank.
    let mut ordered: Vec<&Content> = Vec::with_capacity(sorted.len() + 1);
    ordered.push(candidate);
    ordered.extend(sorted.iter());
    ordered.sort_by_key(|content| config.rank(content.source()).unwrap_or(usize::MAX));

    let chosen = ordered[0];
    let others = &ordered[1..];

    let min_id = ordered
        .iter()
        .map(|content| content.id())
        .min()
        .unwrap_or_else(|| chosen.id());

    let description = merge_description(chosen, others, config, now).with_id(min_id);

    match chosen {
        Content::Item(item) => Content::Item(merge_item(item, others, config, description)),
        Content::Container(container) => {
            Content::Container(merge_container(container, others, description))
        }
    }
}

// ---------------------------------------------------------------------------
// Shared descriptive fields
// ---------------------------------------------------------------------------

fn merge_description(
    chosen: &Content,
    others: &[&Content],
    config: &PrecedenceConfig,
    now: DateTime<Utc>,
) -> Description {
    let mut merged = chosen.description().clone();

    for other in others {
        let desc = other.description();

        fill(&mut merged.title, &desc.title);
        fill(&mut merged.short_synopsis, &desc.short_synopsis);
        fill(&mut merged.medium_synopsis, &desc.medium_synopsis);
        fill(&mut merged.long_synopsis, &desc.long_synopsis);
        fill(&mut merged.year, &desc.year);

        merged.genres.extend(desc.genres.iter().cloned());
        merged.tags.extend(desc.tags.iter().cloned());
        merged.key_phrases.extend(desc.key_phrases.iter().cloned());
        merged.languages.extend(desc.languages.iter().cloned());
        merged
            .subtitle_languages
            .extend(desc.subtitle_languages.iter().cloned());
        merged.aliases.extend(desc.aliases.iter().cloned());

        append_missing(&mut merged.related_links, &desc.related_links);
        append_missing(&mut merged.certificates, &desc.certificates);
        append_missing(&mut merged.release_dates, &desc.release_dates);
        append_missing(&mut merged.clips, &desc.clips);
    }

    if config.image_precedence() {
        // The single highest-precedence source with a currently-available
        // image contributes its whole image set; images are never mixed
        // per-image across sources.
        merged.images = std::iter::once(chosen)
            .chain(others.iter().copied())
            .find(|member| {
                member
                    .description()
                    .images
                    .iter()
                    .any(|image| image.is_available_at(now))
            })
            .map(|member| member.description().images.clone())
            .unwrap_or_default();
    }

    merged
}

// ---------------------------------------------------------------------------
// Item rules
// ---------------------------------------------------------------------------

fn merge_item(
    chosen: &Item,
    others: &[&Content],
    config: &PrecedenceConfig,
    description: Description,
) -> Item {
    let other_items: Vec<&Item> = others.iter().filter_map(|c| c.as_item()).collect();

    Item {
        kind: merge_item_kind(&chosen.kind, &other_items),
        container: merge_container_ref(chosen, &other_items, config),
        broadcasts: merge_broadcasts(&chosen.broadcasts, &other_items),
        segment_events: merge_segment_events(chosen, &other_items),
        people: merge_people(chosen, &other_items, config),
        description,
    }
}

fn merge_item_kind(chosen: &ItemKind, others: &[&Item]) -> ItemKind {
    match chosen.clone() {
        ItemKind::Episode {
            mut series_number,
            mut episode_number,
        } => {
            for other in others {
                if let ItemKind::Episode {
                    series_number: series,
                    episode_number: episode,
                } = &other.kind
                {
                    fill(&mut series_number, series);
                    fill(&mut episode_number, episode);
                }
            }
            ItemKind::Episode {
                series_number,
                episode_number,
            }
        }
        ItemKind::Film { mut release_year } => {
            for other in others {
                if let ItemKind::Film {
                    release_year: year,
                } = &other.kind
                {
                    fill(&mut release_year, year);
                }
            }
            ItemKind::Film { release_year }
        }
        ItemKind::Clip => ItemKind::Clip,
    }
}

fn merge_container_ref(
    chosen: &Item,
    others: &[&Item],
    config: &PrecedenceConfig,
) -> Option<ContentId> {
    if let Some(hierarchy) = config.hierarchy_precedence() {
        for source in hierarchy {
            let asserted = std::iter::once(chosen)
                .chain(others.iter().copied())
                .find(|item| &item.description.source == source && item.container.is_some());
            if let Some(item) = asserted {
                return item.container;
            }
        }
    }

    let mut container = chosen.container;
    for other in others {
        fill(&mut container, &other.container);
    }
    container
}

/// Fills null fields on each of the chosen record's broadcasts from
/// equivalents' broadcasts in the same slot (equal channel id and equal
/// transmission start). Equivalents' broadcasts that match no chosen slot
/// are dropped, not added.
fn merge_broadcasts(chosen: &[Broadcast], others: &[&Item]) -> Vec<Broadcast> {
    chosen
        .iter()
        .map(|broadcast| {
            let mut merged = broadcast.clone();
            for other in others {
                for other_broadcast in &other.broadcasts {
                    if merged.same_slot(other_broadcast) {
                        fill_broadcast(&mut merged, other_broadcast);
                    }
                }
            }
            merged
        })
        .collect()
}

fn fill_broadcast(dest: &mut Broadcast, src: &Broadcast) {
    fill(&mut dest.repeat, &src.repeat);
    fill(&mut dest.schedule_date, &src.schedule_date);
    fill(&mut dest.source_id, &src.source_id);
    fill(&mut dest.subtitled, &src.subtitled);
    fill(&mut dest.signed, &src.signed);
    fill(&mut dest.audio_described, &src.audio_described);
    fill(&mut dest.high_definition, &src.high_definition);
    fill(&mut dest.widescreen, &src.widescreen);
    fill(&mut dest.surround, &src.surround);
    fill(&mut dest.live, &src.live);
    fill(&mut dest.new_series, &src.new_series);
    fill(&mut dest.premiere, &src.premiere);
    fill(&mut dest.blackout_restriction, &src.blackout_restriction);
    dest.aliases.extend(src.aliases.iter().cloned());
}

fn merge_segment_events(chosen: &Item, others: &[&Item]) -> Vec<SegmentEvent> {
    let own_source = &chosen.description.source;
    let mut events = chosen.segment_events.clone();
    for other in others {
        events.extend(
            other
                .segment_events
                .iter()
                .filter(|event| &event.source != own_source)
                .cloned(),
        );
    }
    events
}

fn merge_people(chosen: &Item, others: &[&Item], config: &PrecedenceConfig) -> Vec<CrewMember> {
    if !config.people_precedence() {
        return chosen.people.clone();
    }
    std::iter::once(chosen)
        .chain(others.iter().copied())
        .find(|item| !item.people.is_empty())
        .map(|item| item.people.clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Container rules
// ---------------------------------------------------------------------------

fn merge_container(chosen: &Container, others: &[&Content], description: Description) -> Container {
    let other_containers: Vec<&Container> =
        others.iter().filter_map(|c| c.as_container()).collect();

    let kind = match chosen.kind.clone() {
        ContainerKind::Series { mut series_number } => {
            for other in &other_containers {
                if let ContainerKind::Series {
                    series_number: number,
                } = &other.kind
                {
                    fill(&mut series_number, number);
                }
            }
            ContainerKind::Series { series_number }
        }
        ContainerKind::Brand => ContainerKind::Brand,
    };

    let upcoming = first_non_empty(
        &chosen.upcoming,
        other_containers.iter().map(|c| &c.upcoming),
    );
    let child_summaries = first_non_empty(
        &chosen.child_summaries,
        other_containers.iter().map(|c| &c.child_summaries),
    );

    // Keyed availability unions with first-writer-per-key: a key written by
    // a more precedent source is never overwritten.
    let mut available_content = chosen.available_content.clone();
    for other in &other_containers {
        for (key, value) in &other.available_content {
            available_content
                .entry(*key)
                .or_insert_with(|| value.clone());
        }
    }

    Container {
        kind,
        upcoming,
        child_summaries,
        available_content,
        description,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if slot.is_none() && value.is_some() {
        *slot = value.clone();
    }
}

fn append_missing<T: Clone + PartialEq>(dest: &mut Vec<T>, src: &[T]) {
    for item in src {
        if !dest.contains(item) {
            dest.push(item.clone());
        }
    }
}

fn first_non_empty<'a, T: Clone + 'a>(
    chosen: &[T],
    others: impl Iterator<Item = &'a Vec<T>>,
) -> Vec<T> {
    if !chosen.is_empty() {
        return chosen.to_vec();
    }
    for other in others {
        if !other.is_empty() {
            return other.clone();
        }
    }
    Vec::new()
}
