//! Images attached to content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image supplied by one provider, with its availability window.
///
/// The window is half-open: available from `available_from` (inclusive)
/// until `available_until` (exclusive); an unset bound is unbounded on that
/// side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}

impl Image {
    /// Creates an always-available image.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
            available_from: None,
            available_until: None,
        }
    }

    #[must_use]
    pub fn with_window(
        mut self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Self {
        self.available_from = from;
        self.available_until = until;
        self
    }

    /// True when the availability window contains `when`.
    #[must_use]
    pub fn is_available_at(&self, when: DateTime<Utc>) -> bool {
        let started = self.available_from.is_none_or(|from| from <= when);
        let not_ended = self.available_until.is_none_or(|until| when < until);
        started && not_ended
    }
}
