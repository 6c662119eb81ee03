use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::{Draft, require};
use crate::error::CoreResult;

/// Base URL of the templated avatar generator.
const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Unique identifier for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A user-defined character.
///
/// The chat app talks to characters; the story app lists them as the crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Free-text description (appearance, backstory).
    pub description: String,
    /// Personality traits in the chat app, an emoji in the story app.
    /// Empty when not provided.
    #[serde(default)]
    pub personality: String,
    /// Generated avatar image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Character {
    /// Create a character with a fresh ID and no avatar.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        personality: impl Into<String>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            description: description.into(),
            personality: personality.into(),
            avatar: None,
        }
    }

    /// Attach an avatar URL generated from the character's name.
    pub fn with_generated_avatar(mut self) -> Self {
        self.avatar = Some(avatar_url(&self.name));
        self
    }

    /// First letter of the name, used where no avatar image can be shown.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Build the avatar URL for a name.
///
/// The name is percent-encoded so spaces and non-ASCII names produce a valid
/// query string.
pub fn avatar_url(name: &str) -> String {
    format!("{AVATAR_BASE}{}", urlencoding::encode(name))
}

/// Form state for creating a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    /// Name field (required).
    pub name: String,
    /// Description field (required).
    pub description: String,
    /// Personality or emoji field (optional).
    pub personality: String,
}

impl CharacterDraft {
    /// Create a draft with all fields filled in.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        personality: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            personality: personality.into(),
        }
    }
}

impl Draft for CharacterDraft {
    type Output = Character;

    fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)?;
        require("description", &self.description)
    }

    fn build(&self) -> Character {
        Character::new(
            self.name.trim(),
            self.description.trim(),
            self.personality.trim(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use proptest::prelude::*;

    #[test]
    fn submit_builds_and_resets() {
        let mut draft = CharacterDraft::new("Lyra", "A wandering bard", "cheerful");
        let c = draft.submit().unwrap();
        assert_eq!(c.name, "Lyra");
        assert_eq!(c.description, "A wandering bard");
        assert_eq!(c.personality, "cheerful");
        assert!(c.avatar.is_none());
        assert_eq!(draft, CharacterDraft::default());
    }

    #[test]
    fn personality_is_optional() {
        let mut draft = CharacterDraft::new("Lyra", "A wandering bard", "");
        assert!(draft.submit().is_ok());
    }

    #[test]
    fn missing_description_keeps_draft() {
        let mut draft = CharacterDraft::new("Lyra", "", "cheerful");
        assert_eq!(
            draft.submit(),
            Err(CoreError::MissingField("description"))
        );
        assert_eq!(draft.name, "Lyra");
        assert_eq!(draft.personality, "cheerful");
    }

    #[test]
    fn fields_are_trimmed() {
        let mut draft = CharacterDraft::new("  Lyra ", " bard ", " calm ");
        let c = draft.submit().unwrap();
        assert_eq!(c.name, "Lyra");
        assert_eq!(c.description, "bard");
        assert_eq!(c.personality, "calm");
    }

    #[test]
    fn ids_are_unique() {
        let a = CharacterDraft::new("A", "a", "").submit().unwrap();
        let b = CharacterDraft::new("A", "a", "").submit().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn avatar_url_encodes_name() {
        assert_eq!(
            avatar_url("Kael"),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=Kael"
        );
        assert_eq!(
            avatar_url("Old Tom"),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=Old%20Tom"
        );
        assert_eq!(
            avatar_url("Zoë & Co"),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=Zo%C3%AB%20%26%20Co"
        );
    }

    #[test]
    fn generated_avatar_attached() {
        let c = Character::new("Nova", "pilot", "").with_generated_avatar();
        assert_eq!(c.avatar.as_deref(), Some(avatar_url("Nova").as_str()));
    }

    #[test]
    fn initial_of_name() {
        assert_eq!(Character::new("Zed", "x", "").initial(), 'Z');
        assert_eq!(Character::new("", "x", "").initial(), '?');
    }

    #[test]
    fn serde_without_avatar_field() {
        let json = r#"{"id":"6f1c1f47-6a43-4a6e-9d0e-3a4f6c1b2d10","name":"Nova","description":"pilot"}"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.name, "Nova");
        assert!(c.personality.is_empty());
        assert!(c.avatar.is_none());
    }

    proptest! {
        #[test]
        fn blank_name_never_submits(name in "[ \t]{0,4}", desc in "[a-z]{1,12}") {
            let mut draft = CharacterDraft::new(name, desc, "");
            let before = draft.clone();
            prop_assert!(draft.submit().is_err());
            prop_assert_eq!(draft, before);
        }

        #[test]
        fn filled_fields_always_submit(name in "[A-Za-z]{1,12}", desc in "[a-z ]{0,8}[a-z]") {
            let mut draft = CharacterDraft::new(name.clone(), desc, "");
            let c = draft.submit().unwrap();
            prop_assert_eq!(c.name, name);
            prop_assert_eq!(draft, CharacterDraft::default());
        }
    }
}
