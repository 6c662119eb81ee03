//! Core types for Story Forge: characters, worlds, chat messages, and the
//! form drafts they are created from.
//!
//! Both front ends (the character chat and the sci-fi story) build on these
//! types. Nothing here knows about terminals or storage.

/// Characters, their identifiers, and avatar URLs.
pub mod character;
/// Form drafts and the submit-then-reset rule.
pub mod draft;
/// Error types used throughout the crate.
pub mod error;
/// Chat messages and sender tags.
pub mod message;
/// User-defined worlds.
pub mod world;

/// Re-export character types.
pub use character::{Character, CharacterDraft, CharacterId, avatar_url};
/// Re-export the draft trait.
pub use draft::Draft;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export message types.
pub use message::{Message, MessageId, Sender};
/// Re-export world types.
pub use world::{World, WorldDraft, WorldId};
