//! Character chat for Story Forge.
//!
//! Users create characters and worlds, pick a character, and send it
//! messages. Each message schedules a canned reply that is delivered after a
//! fixed delay. The reply always speaks as the character that was selected
//! when the message was sent.

pub mod config;
pub mod error;
pub mod pending;
pub mod responder;
pub mod session;
pub mod state;

pub use config::ChatConfig;
pub use error::{ChatError, ChatResult};
pub use pending::{PendingReplies, PendingReply};
pub use responder::{CannedResponder, Responder};
pub use session::ChatSession;
pub use state::ChatState;
