//! Identifier types used throughout the MediaFuse core.
//!
//! Content identifiers are numeric and totally ordered. The order is
//! load-bearing: the externally visible id of a merged equivalence set is
//! defined as the minimum id across the whole set, so ids must compare the
//! same way everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for one provider's version of a content entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(u64);

impl ContentId {
    /// Creates a content id from a raw numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<u64> for ContentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a broadcast channel (a linear service a broadcast airs on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Creates a channel id from a raw numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_orders_numerically() {
        assert!(ContentId::new(2) < ContentId::new(10));
        assert_eq!(
            ContentId::new(2),
            [ContentId::new(5), ContentId::new(2), ContentId::new(10)]
                .into_iter()
                .min()
                .unwrap()
        );
    }

    #[test]
    fn content_id_display_parse_round_trip() {
        let id = ContentId::new(42);
        let parsed: ContentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn content_id_rejects_garbage() {
        assert!("not-a-number".parse::<ContentId>().is_err());
    }

    proptest::proptest! {
        #[test]
        fn display_parse_round_trips(raw in proptest::prelude::any::<u64>()) {
            let id = ContentId::new(raw);
            let parsed: ContentId = id.to_string().parse().unwrap();
            proptest::prop_assert_eq!(id, parsed);
        }
    }
}
