//! Broadcast slots.

use chrono::{DateTime, NaiveDate, Utc};
use mediafuse_types::ChannelId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One transmission of an item on a linear channel.
///
/// Identity for merging purposes is the `(channel, transmission_start)` pair:
/// two providers describing a broadcast on the same channel at the same
/// instant are describing the same slot, whatever else they disagree on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub channel: ChannelId,
    pub transmission_start: DateTime<Utc>,
    pub transmission_end: Option<DateTime<Utc>>,
    /// Provider-issued identifiers for this slot.
    pub aliases: BTreeSet<String>,
    pub repeat: Option<bool>,
    pub schedule_date: Option<NaiveDate>,
    /// The provider's own id for the slot, e.g. a PCRID.
    pub source_id: Option<String>,
    pub subtitled: Option<bool>,
    pub signed: Option<bool>,
    pub audio_described: Option<bool>,
    pub high_definition: Option<bool>,
    pub widescreen: Option<bool>,
    pub surround: Option<bool>,
    pub live: Option<bool>,
    pub new_series: Option<bool>,
    pub premiere: Option<bool>,
    pub blackout_restriction: Option<bool>,
}

impl Broadcast {
    /// Creates a broadcast slot with every descriptive field unset.
    pub fn new(channel: ChannelId, transmission_start: DateTime<Utc>) -> Self {
        Self {
            channel,
            transmission_start,
            transmission_end: None,
            aliases: BTreeSet::new(),
            repeat: None,
            schedule_date: None,
            source_id: None,
            subtitled: None,
            signed: None,
            audio_described: None,
            high_definition: None,
            widescreen: None,
            surround: None,
            live: None,
            new_series: None,
            premiere: None,
            blackout_restriction: None,
        }
    }

    /// True when `other` describes the same slot: equal channel id and equal
    /// transmission start.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.channel == other.channel && self.transmission_start == other.transmission_start
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = Some(repeat);
        self
    }

    #[must_use]
    pub fn with_live(mut self, live: bool) -> Self {
        self.live = Some(live);
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slot_identity_is_channel_and_start() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let a = Broadcast::new(ChannelId::new(2), start);
        let b = Broadcast::new(ChannelId::new(2), start).with_repeat(true);
        let c = Broadcast::new(ChannelId::new(1), start);

        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
    }
}
