//! Source keys.
//!
//! A source (also called a publisher) is an upstream data provider asserting
//! its own version of a content entity. Sources are identified by a stable
//! key, conventionally the provider's domain (e.g. `"bbc.co.uk"`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying an upstream data provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(String);

impl Source {
    /// Creates a source from its key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the source key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Source {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_compare_by_key() {
        assert_eq!(Source::new("bbc.co.uk"), Source::from("bbc.co.uk"));
        assert_ne!(Source::new("bbc.co.uk"), Source::new("pressassociation.com"));
    }
}
