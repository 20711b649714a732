//! Canonical renderings of the entity model.
//!
//! One explicit visitor implementation per type, replacing the reflective
//! field walk the model's ancestry used. Fields are emitted in declaration
//! order; `Description::last_fetched` is process-local bookkeeping and is
//! deliberately not emitted.

use crate::canonical::{Canonical, Canonicalizer};
use mediafuse_model::{
    Broadcast, Certificate, ChildRef, ClipRef, Container, ContainerKind, Content, CrewMember,
    Description, Image, Item, ItemKind, RelatedLink, ReleaseDate, SegmentEvent,
};
use mediafuse_types::{ChannelId, ContentId, Source};

impl Canonical for ContentId {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Id", self);
    }
}

impl Canonical for ChannelId {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Channel", self);
    }
}

impl Canonical for Source {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.scalar("Source", self);
    }
}

impl Canonical for Content {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        match self {
            Content::Item(item) => item.canonicalize(canon),
            Content::Container(container) => container.canonicalize(canon),
        }
    }
}

impl Canonical for Item {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Item", |fields| {
            fields
                .field(&self.description)
                .field(&self.kind)
                .field(&self.container)
                .field(&self.broadcasts)
                .field(&self.segment_events)
                .field(&self.people);
        });
    }
}

impl Canonical for ItemKind {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        match self {
            ItemKind::Episode {
                series_number,
                episode_number,
            } => canon.record("Episode", |fields| {
                fields.field(series_number).field(episode_number);
            }),
            ItemKind::Film { release_year } => canon.record("Film", |fields| {
                fields.field(release_year);
            }),
            ItemKind::Clip => canon.record("Clip", |_| {}),
        }
    }
}

impl Canonical for Container {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Container", |fields| {
            fields
                .field(&self.description)
                .field(&self.kind)
                .field(&self.upcoming)
                .field(&self.child_summaries)
                .field(&self.available_content);
        });
    }
}

impl Canonical for ContainerKind {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        match self {
            ContainerKind::Brand => canon.record("Brand", |_| {}),
            ContainerKind::Series { series_number } => canon.record("Series", |fields| {
                fields.field(series_number);
            }),
        }
    }
}

impl Canonical for Description {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Description", |fields| {
            fields
                .field(&self.id)
                .field(&self.source)
                .field(&self.title)
                .field(&self.short_synopsis)
                .field(&self.medium_synopsis)
                .field(&self.long_synopsis)
                .field(&self.year)
                .field(&self.genres)
                .field(&self.tags)
                .field(&self.key_phrases)
                .field(&self.languages)
                .field(&self.subtitle_languages)
                .field(&self.aliases)
                .field(&self.related_links)
                .field(&self.certificates)
                .field(&self.release_dates)
                .field(&self.clips)
                .field(&self.images)
                // last_fetched is excluded: process-local state must not
                // perturb the fingerprint.
                .field(&self.extra);
        });
    }
}

impl Canonical for RelatedLink {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("RelatedLink", |fields| {
            fields.field(&self.url).field(&self.kind).field(&self.title);
        });
    }
}

impl Canonical for Certificate {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Certificate", |fields| {
            fields.field(&self.classification).field(&self.country);
        });
    }
}

impl Canonical for ReleaseDate {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("ReleaseDate", |fields| {
            fields.field(&self.date).field(&self.country);
        });
    }
}

impl Canonical for ClipRef {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("ClipRef", |fields| {
            fields.field(&self.uri).field(&self.title);
        });
    }
}

impl Canonical for Image {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Image", |fields| {
            fields
                .field(&self.uri)
                .field(&self.width)
                .field(&self.height)
                .field(&self.available_from)
                .field(&self.available_until);
        });
    }
}

impl Canonical for Broadcast {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("Broadcast", |fields| {
            fields
                .field(&self.channel)
                .field(&self.transmission_start)
                .field(&self.transmission_end)
                .field(&self.aliases)
                .field(&self.repeat)
                .field(&self.schedule_date)
                .field(&self.source_id)
                .field(&self.subtitled)
                .field(&self.signed)
                .field(&self.audio_described)
                .field(&self.high_definition)
                .field(&self.widescreen)
                .field(&self.surround)
                .field(&self.live)
                .field(&self.new_series)
                .field(&self.premiere)
                .field(&self.blackout_restriction);
        });
    }
}

impl Canonical for SegmentEvent {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("SegmentEvent", |fields| {
            fields
                .field(&self.uri)
                .field(&self.source)
                .field(&self.position)
                .field(&self.offset_millis)
                .field(&self.duration_millis)
                .field(&self.title);
        });
    }
}

impl Canonical for CrewMember {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("CrewMember", |fields| {
            fields
                .field(&self.name)
                .field(&self.role)
                .field(&self.character);
        });
    }
}

impl Canonical for ChildRef {
    fn canonicalize(&self, canon: &mut Canonicalizer) {
        canon.record("ChildRef", |fields| {
            fields.field(&self.id).field(&self.title);
        });
    }
}
