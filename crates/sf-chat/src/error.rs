//! Error types for the chat app.

use thiserror::Error;

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors reported to the user of a chat session.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A message was sent before any character was selected.
    #[error("select a character first (try: select <name>)")]
    NoCharacterSelected,

    /// No character with the given name exists.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// Malformed command arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
