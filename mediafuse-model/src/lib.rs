//! Content entity model for MediaFuse.
//!
//! Records are immutable value types: every mutation constructs a new value
//! through `with_*` combinators, so the merger's "never mutate inputs"
//! guarantee is structural rather than a convention. Content kinds form a
//! closed sum type ([`Content`]), which makes merge dispatch an exhaustive
//! match: an unmodelled kind is a compile error, not a runtime fault.

mod broadcast;
mod content;
mod description;
mod image;
mod people;
mod segment;

pub use broadcast::Broadcast;
pub use content::{ChildRef, Container, ContainerKind, Content, Item, ItemKind};
pub use description::{Certificate, ClipRef, Description, RelatedLink, ReleaseDate};
pub use image::Image;
pub use people::CrewMember;
pub use segment::SegmentEvent;
