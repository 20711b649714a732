//! Cast and crew.

use serde::{Deserialize, Serialize};

/// One cast or crew credit on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    /// Production role, e.g. `"director"`.
    pub role: Option<String>,
    /// Character name for cast credits.
    pub character: Option<String>,
}

impl CrewMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            character: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }
}
