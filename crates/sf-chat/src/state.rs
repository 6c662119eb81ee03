//! Chat application state and its update functions.
//!
//! `ChatState` owns every list the chat app shows. Each update is a method
//! that either changes the state or leaves it untouched; invalid input is a
//! silent no-op, mirroring a form that ignores an incomplete submission.

use std::time::{Duration, Instant};

use sf_core::{
    Character, CharacterDraft, CharacterId, Draft, Message, MessageId, World, WorldDraft,
};

use crate::config::DEFAULT_REPLY_DELAY;
use crate::pending::{PendingReplies, PendingReply};
use crate::responder::Responder;

/// All state owned by the chat app.
#[derive(Debug, Clone)]
pub struct ChatState {
    worlds: Vec<World>,
    characters: Vec<Character>,
    messages: Vec<Message>,
    selected: Option<CharacterId>,
    pending: PendingReplies,
    reply_delay: Duration,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ChatState {
    /// Create empty state with the given reply delay.
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            worlds: Vec::new(),
            characters: Vec::new(),
            messages: Vec::new(),
            selected: None,
            pending: PendingReplies::new(),
            reply_delay,
        }
    }

    /// All worlds in creation order.
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// All characters in creation order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// The chat log in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replies that have not been delivered yet.
    pub fn pending(&self) -> &PendingReplies {
        &self.pending
    }

    /// The currently selected character.
    pub fn selected(&self) -> Option<&Character> {
        let id = self.selected?;
        self.characters.iter().find(|c| c.id == id)
    }

    /// Find a character by name (case-insensitive).
    pub fn find_character(&self, name: &str) -> Option<&Character> {
        let name = name.to_lowercase();
        self.characters
            .iter()
            .find(|c| c.name.to_lowercase() == name)
    }

    /// Create a world from a draft.
    ///
    /// On success the draft is reset. An incomplete draft changes nothing.
    pub fn create_world(&mut self, draft: &mut WorldDraft) -> Option<&World> {
        match draft.submit() {
            Ok(world) => {
                tracing::info!(id = %world.id, name = %world.name, "world created");
                self.worlds.push(world);
                self.worlds.last()
            }
            Err(e) => {
                tracing::debug!("world draft ignored: {e}");
                None
            }
        }
    }

    /// Create a character from a draft, attaching a generated avatar.
    ///
    /// On success the draft is reset. An incomplete draft changes nothing.
    pub fn create_character(&mut self, draft: &mut CharacterDraft) -> Option<&Character> {
        match draft.submit() {
            Ok(character) => {
                let character = character.with_generated_avatar();
                tracing::info!(id = %character.id, name = %character.name, "character created");
                self.characters.push(character);
                self.characters.last()
            }
            Err(e) => {
                tracing::debug!("character draft ignored: {e}");
                None
            }
        }
    }

    /// Select the character to chat with. Unknown IDs are ignored.
    pub fn select_character(&mut self, id: CharacterId) -> bool {
        if self.characters.iter().any(|c| c.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Append a user message and schedule the selected character's reply.
    ///
    /// Blank text or no selection is a no-op. The reply speaks as the
    /// character selected right now, even if the selection changes before
    /// it is delivered.
    pub fn send_message(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let character = self.selected()?.clone();

        let message = Message::from_user(text);
        let id = message.id;
        self.messages.push(message);

        self.pending.schedule(PendingReply {
            due: now + self.reply_delay,
            character,
            prompt: text.to_string(),
        });
        Some(id)
    }

    /// Deliver every reply that is due at `now`, returning the new messages.
    pub fn deliver_due(&mut self, now: Instant, responder: &mut dyn Responder) -> Vec<Message> {
        let mut delivered = Vec::new();
        for reply in self.pending.take_due(now) {
            let text = responder.respond(&reply.prompt, &reply.character);
            let message = Message::from_character(&reply.character.name, text);
            tracing::debug!(character = %reply.character.name, "reply delivered");
            self.messages.push(message.clone());
            delivered.push(message);
        }
        delivered
    }

    /// Earliest time a reply becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.next_due()
    }
}
