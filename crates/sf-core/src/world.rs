use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::{Draft, require};
use crate::error::CoreResult;

/// Unique identifier for a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Generate a new random world ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A user-defined setting for stories. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Unique identifier.
    pub id: WorldId,
    /// World name.
    pub name: String,
    /// What happens there, the atmosphere, who lives there.
    pub description: String,
    /// Genre label; empty when not given.
    #[serde(default)]
    pub genre: String,
}

/// Form state for creating a world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldDraft {
    /// Name field (required).
    pub name: String,
    /// Description field (required).
    pub description: String,
    /// Genre field (optional).
    pub genre: String,
}

impl WorldDraft {
    /// Create a draft with all fields filled in.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            genre: genre.into(),
        }
    }
}

impl Draft for WorldDraft {
    type Output = World;

    fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)?;
        require("description", &self.description)
    }

    fn build(&self) -> World {
        World {
            id: WorldId::new(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            genre: self.genre.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn submit_world() {
        let mut draft = WorldDraft::new("Aurelia", "Floating islands", "fantasy");
        let w = draft.submit().unwrap();
        assert_eq!(w.name, "Aurelia");
        assert_eq!(w.genre, "fantasy");
        assert_eq!(draft, WorldDraft::default());
    }

    #[test]
    fn genre_is_optional() {
        let w = WorldDraft::new("Aurelia", "Floating islands", "")
            .submit()
            .unwrap();
        assert!(w.genre.is_empty());
    }

    #[test]
    fn missing_name_rejected() {
        let mut draft = WorldDraft::new("", "Floating islands", "fantasy");
        assert_eq!(draft.submit(), Err(CoreError::MissingField("name")));
        assert_eq!(draft.description, "Floating islands");
    }

    #[test]
    fn id_display_is_short() {
        let id = WorldId::new();
        assert_eq!(id.to_string().len(), 8);
    }
}
