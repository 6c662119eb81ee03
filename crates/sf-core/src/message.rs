use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Generate a new random message ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person at the keyboard.
    User,
    /// A character replying.
    Character,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Character => write!(f, "character"),
        }
    }
}

/// One entry in the chat log. Messages are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// Sender tag.
    pub sender: Sender,
    /// Message text.
    pub text: String,
    /// Name of the replying character; `None` for user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    /// When the message was appended.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by the user.
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::User,
            text: text.into(),
            character_name: None,
            sent_at: Utc::now(),
        }
    }

    /// A reply spoken by a character.
    pub fn from_character(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Character,
            text: text.into(),
            character_name: Some(name.into()),
            sent_at: Utc::now(),
        }
    }

    /// Label shown in front of the text: `you` or the character's name.
    pub fn speaker(&self) -> &str {
        match self.sender {
            Sender::User => "you",
            Sender::Character => self.character_name.as_deref().unwrap_or("character"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_no_character() {
        let m = Message::from_user("hello");
        assert_eq!(m.sender, Sender::User);
        assert!(m.character_name.is_none());
        assert_eq!(m.speaker(), "you");
    }

    #[test]
    fn character_message_speaker() {
        let m = Message::from_character("Lyra", "Hi!");
        assert_eq!(m.sender, Sender::Character);
        assert_eq!(m.speaker(), "Lyra");
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Sender::Character).unwrap(),
            "\"character\""
        );
    }
}
