//! Text-command chat session.
//!
//! `ChatSession` wraps a [`ChatState`] and a [`Responder`] behind a small
//! command language so line-based front ends can drive the chat app.

use std::time::Instant;

use sf_core::{CharacterDraft, WorldDraft};

use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::responder::{CannedResponder, Responder};
use crate::state::ChatState;

/// An interactive chat session.
pub struct ChatSession {
    state: ChatState,
    responder: Box<dyn Responder>,
}

impl ChatSession {
    /// Create a session with the canned responder.
    pub fn new(config: ChatConfig) -> Self {
        let responder = CannedResponder::from_config(&config);
        Self::with_responder(config, Box::new(responder))
    }

    /// Create a session with a custom responder.
    pub fn with_responder(config: ChatConfig, responder: Box<dyn Responder>) -> Self {
        Self {
            state: ChatState::new(config.reply_delay),
            responder,
        }
    }

    /// Get the chat state.
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Get the chat state for direct updates from form-based front ends.
    pub fn state_mut(&mut self) -> &mut ChatState {
        &mut self.state
    }

    /// Welcome text shown when the session starts.
    pub fn intro(&self) -> String {
        "Story Forge chat\n\
         Create characters and worlds, then pick a character to talk to.\n\
         Type 'help' for commands."
            .to_string()
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str, now: Instant) -> ChatResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        if self.state.selected().is_some() && !self.is_command(&cmd, rest) {
            return self.do_say(trimmed, now);
        }

        match cmd.as_str() {
            "character" | "char" => self.do_create_character(rest),
            "world" => self.do_create_world(rest),
            "characters" | "chars" => Ok(self.do_list_characters()),
            "worlds" => Ok(self.do_list_worlds()),
            "select" => self.do_select(rest),
            "say" => self.do_say(rest, now),
            "log" => Ok(self.do_log()),
            "help" => Ok(help_text()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(ChatError::UnknownCommand(cmd)),
        }
    }

    /// Whether a line is a command rather than chat text.
    ///
    /// Only consulted while a character is selected: a line is a command
    /// when its arguments fit the command, so "help me find the key" and
    /// "worlds collide" are sent as messages.
    fn is_command(&self, cmd: &str, rest: &str) -> bool {
        match cmd {
            "say" => true,
            "characters" | "chars" | "worlds" | "log" | "help" | "quit" | "q" => rest.is_empty(),
            "character" | "char" | "world" => rest.contains('|'),
            "select" => self.state.find_character(rest).is_some(),
            _ => false,
        }
    }

    /// Deliver replies that are due, formatted for display.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        self.state
            .deliver_due(now, self.responder.as_mut())
            .into_iter()
            .map(|m| format!("{}: {}", m.speaker(), m.text))
            .collect()
    }

    /// Earliest time a reply becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.state.next_due()
    }

    fn do_create_character(&mut self, rest: &str) -> ChatResult<String> {
        let fields = split_fields(rest);
        let mut draft = CharacterDraft::new(
            field(&fields, 0),
            field(&fields, 1),
            field(&fields, 2),
        );
        match self.state.create_character(&mut draft) {
            Some(c) => Ok(format!("Character created: {}", c.name)),
            None => Err(ChatError::InvalidInput(
                "usage: character <name> | <description> [| <personality>]".to_string(),
            )),
        }
    }

    fn do_create_world(&mut self, rest: &str) -> ChatResult<String> {
        let fields = split_fields(rest);
        let mut draft = WorldDraft::new(field(&fields, 0), field(&fields, 1), field(&fields, 2));
        match self.state.create_world(&mut draft) {
            Some(w) => Ok(format!("World created: {}", w.name)),
            None => Err(ChatError::InvalidInput(
                "usage: world <name> | <description> [| <genre>]".to_string(),
            )),
        }
    }

    fn do_list_characters(&self) -> String {
        let characters = self.state.characters();
        if characters.is_empty() {
            return "No characters yet. Create one with: character <name> | <description>"
                .to_string();
        }
        let selected = self.state.selected().map(|c| c.id);
        let mut out = format!("Characters ({}):\n", characters.len());
        for (i, c) in characters.iter().enumerate() {
            let marker = if Some(c.id) == selected { "*" } else { " " };
            out.push_str(&format!("{marker} {}. {}", i + 1, c.name));
            if !c.personality.is_empty() {
                out.push_str(&format!(" ({})", c.personality));
            }
            out.push_str(&format!(" - {}\n", c.description));
        }
        out.trim_end().to_string()
    }

    fn do_list_worlds(&self) -> String {
        let worlds = self.state.worlds();
        if worlds.is_empty() {
            return "No worlds yet. Create one with: world <name> | <description>".to_string();
        }
        let mut out = format!("Worlds ({}):\n", worlds.len());
        for (i, w) in worlds.iter().enumerate() {
            out.push_str(&format!("  {}. {}", i + 1, w.name));
            if !w.genre.is_empty() {
                out.push_str(&format!(" [{}]", w.genre));
            }
            out.push_str(&format!(" - {}\n", w.description));
        }
        out.trim_end().to_string()
    }

    fn do_select(&mut self, name: &str) -> ChatResult<String> {
        if name.is_empty() {
            return Err(ChatError::InvalidInput("usage: select <name>".to_string()));
        }
        let character = self
            .state
            .find_character(name)
            .ok_or_else(|| ChatError::UnknownCharacter(name.to_string()))?;
        let (id, out) = (
            character.id,
            format!("Chatting with {}. {}", character.name, character.description),
        );
        self.state.select_character(id);
        Ok(out)
    }

    fn do_say(&mut self, text: &str, now: Instant) -> ChatResult<String> {
        let name = self
            .state
            .selected()
            .map(|c| c.name.clone())
            .ok_or(ChatError::NoCharacterSelected)?;
        match self.state.send_message(text, now) {
            Some(_) => Ok(format!("{name} is typing...")),
            None => Err(ChatError::InvalidInput("usage: say <text>".to_string())),
        }
    }

    fn do_log(&self) -> String {
        let messages = self.state.messages();
        if messages.is_empty() {
            return "Start a conversation with a character!".to_string();
        }
        messages
            .iter()
            .map(|m| format!("{}: {}", m.speaker(), m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split `a | b | c` into trimmed fields.
fn split_fields(input: &str) -> Vec<&str> {
    input.split('|').map(str::trim).collect()
}

/// Field `index`, or empty when absent.
fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

fn help_text() -> String {
    "\
Chat Commands:
  character <name> | <description> [| <personality>]   Create a character
  world <name> | <description> [| <genre>]             Create a world
  characters                                           List characters
  worlds                                               List worlds
  select <name>                                        Choose who to talk to
  say <text>                                           Send a message
  <text>                                               Same as say, once selected,
                                                       unless it fits a command above
  log                                                  Show the conversation
  help                                                 Show this help
  quit                                                 Exit"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session() -> ChatSession {
        ChatSession::new(ChatConfig::default().with_seed(42))
    }

    #[test]
    fn create_and_list_characters() {
        let mut s = session();
        let now = Instant::now();
        let out = s
            .process("character Lyra | A wandering bard | cheerful", now)
            .unwrap();
        assert_eq!(out, "Character created: Lyra");

        let list = s.process("characters", now).unwrap();
        assert!(list.contains("Lyra (cheerful) - A wandering bard"));
    }

    #[test]
    fn incomplete_character_reports_usage() {
        let mut s = session();
        let err = s.process("character Lyra", Instant::now()).unwrap_err();
        assert!(err.to_string().contains("usage: character"));
        assert!(s.state().characters().is_empty());
    }

    #[test]
    fn create_world_with_genre() {
        let mut s = session();
        let now = Instant::now();
        s.process("world Aurelia | Floating islands | fantasy", now)
            .unwrap();
        let list = s.process("worlds", now).unwrap();
        assert!(list.contains("Aurelia [fantasy] - Floating islands"));
    }

    #[test]
    fn select_and_chat() {
        let mut s = session();
        let t0 = Instant::now();
        s.process("character Lyra | A wandering bard", t0).unwrap();
        let out = s.process("select lyra", t0).unwrap();
        assert!(out.contains("Chatting with Lyra"));

        let out = s.process("Hello there", t0).unwrap();
        assert_eq!(out, "Lyra is typing...");
        assert!(s.poll(t0).is_empty());

        let replies = s.poll(t0 + Duration::from_millis(1000));
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("Lyra: "));

        let log = s.process("log", t0).unwrap();
        assert!(log.contains("you: Hello there"));
    }

    #[test]
    fn command_words_in_chat_text_are_sent() {
        let mut s = session();
        let t0 = Instant::now();
        s.process("character Lyra | A wandering bard", t0).unwrap();
        s.process("select Lyra", t0).unwrap();

        for line in [
            "help me find the key",
            "worlds collide tonight",
            "log the coordinates",
            "select the red wire",
            "world peace is near",
        ] {
            assert_eq!(s.process(line, t0).unwrap(), "Lyra is typing...", "{line}");
        }
        assert_eq!(s.state().messages().len(), 5);
        assert!(s.state().worlds().is_empty());

        // Lines that fit a command still run it.
        assert!(s.process("help", t0).unwrap().contains("Chat Commands"));
        assert!(s.process("world Aurelia | Islands", t0).unwrap().contains("World created"));
        assert!(s.process("select lyra", t0).unwrap().contains("Chatting with Lyra"));
        assert_eq!(s.state().messages().len(), 5);
    }

    #[test]
    fn say_without_selection() {
        let mut s = session();
        let err = s.process("say hi", Instant::now()).unwrap_err();
        assert!(matches!(err, ChatError::NoCharacterSelected));
    }

    #[test]
    fn unknown_command_without_selection() {
        let mut s = session();
        let err = s.process("dance", Instant::now()).unwrap_err();
        assert!(matches!(err, ChatError::UnknownCommand(_)));
    }

    #[test]
    fn select_unknown_character() {
        let mut s = session();
        let err = s.process("select Ghost", Instant::now()).unwrap_err();
        assert!(matches!(err, ChatError::UnknownCharacter(_)));
    }

    #[test]
    fn empty_log_and_input() {
        let mut s = session();
        let now = Instant::now();
        assert!(s.process("", now).unwrap().is_empty());
        assert!(s.process("log", now).unwrap().contains("Start a conversation"));
    }

    #[test]
    fn quit() {
        let mut s = session();
        assert_eq!(s.process("quit", Instant::now()).unwrap(), "Goodbye!");
    }

    #[test]
    fn split_fields_trims() {
        assert_eq!(split_fields(" a | b |c "), ["a", "b", "c"]);
        assert_eq!(field(&split_fields("a"), 2), "");
    }
}
