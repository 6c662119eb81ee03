//! Error types for the story engine.

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while playing or persisting the story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A scene ID that is not in the scene table.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// A choice number the current scene doesn't have.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Malformed command arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The scene table is inconsistent.
    #[error("invalid scene table: {0}")]
    InvalidTable(String),

    /// No crew member with the given name.
    #[error("crew member not found: {0}")]
    UnknownCrewMember(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Storage I/O failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while saving.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
