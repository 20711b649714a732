//! Fields shared by every content kind.

use chrono::{DateTime, NaiveDate, Utc};
use mediafuse_types::{ContentId, ResourceRef, Source};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::Image;

/// A link from a content record to related external material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub url: String,
    /// Provider-declared link type, e.g. `"simulcast"` or `"article"`.
    pub kind: Option<String>,
    pub title: Option<String>,
}

/// An age-rating certificate issued in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub classification: String,
    pub country: String,
}

/// A release of the content in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub date: NaiveDate,
    pub country: String,
}

/// A lightweight reference to a clip cut from this content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRef {
    pub uri: String,
    pub title: Option<String>,
}

/// The descriptive fields common to every content kind.
///
/// Scalar fields are merged first-non-null in precedence order; the
/// collection fields aggregate across an equivalence set with exact-equality
/// dedup. `last_fetched` is process-local bookkeeping and is excluded from
/// the content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub id: ContentId,
    pub source: Source,
    pub title: Option<String>,
    pub short_synopsis: Option<String>,
    pub medium_synopsis: Option<String>,
    pub long_synopsis: Option<String>,
    pub year: Option<i32>,
    pub genres: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub key_phrases: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub subtitle_languages: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    pub related_links: Vec<RelatedLink>,
    pub certificates: Vec<Certificate>,
    pub release_dates: Vec<ReleaseDate>,
    pub clips: Vec<ClipRef>,
    pub images: Vec<Image>,
    /// When this record was last fetched from its provider. Excluded from
    /// the content hash.
    pub last_fetched: Option<DateTime<Utc>>,
    /// Provider-specific extension data, opaque to the core.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Description {
    /// Creates an empty description for one provider's version of an entity.
    pub fn new(id: ContentId, source: impl Into<Source>) -> Self {
        Self {
            id,
            source: source.into(),
            title: None,
            short_synopsis: None,
            medium_synopsis: None,
            long_synopsis: None,
            year: None,
            genres: BTreeSet::new(),
            tags: BTreeSet::new(),
            key_phrases: BTreeSet::new(),
            languages: BTreeSet::new(),
            subtitle_languages: BTreeSet::new(),
            aliases: BTreeSet::new(),
            related_links: Vec::new(),
            certificates: Vec::new(),
            release_dates: Vec::new(),
            clips: Vec::new(),
            images: Vec::new(),
            last_fetched: None,
            extra: BTreeMap::new(),
        }
    }

    /// The ref identifying this provider's version.
    #[must_use]
    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(self.id, self.source.clone())
    }

    #[must_use]
    pub fn with_id(mut self, id: ContentId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: Vec<Image>) -> Self {
        self.images = images;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinators_build_new_values() {
        let base = Description::new(ContentId::new(1), "bbc.co.uk");
        let titled = base.clone().with_title("Foo");

        assert_eq!(base.title, None);
        assert_eq!(titled.title.as_deref(), Some("Foo"));
        assert_eq!(titled.resource_ref().id(), ContentId::new(1));
    }
}
