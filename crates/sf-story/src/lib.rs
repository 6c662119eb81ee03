//! Branching sci-fi story for Story Forge.
//!
//! A fixed graph of seven scenes, a progress record (current scene plus the
//! texts of the scenes already shown), a crew roster, and a persistence
//! adapter that keeps both records in a local key-value store.

pub mod config;
pub mod error;
pub mod persist;
pub mod progress;
pub mod scene;
pub mod session;
pub mod state;
pub mod store;

pub use config::StoryConfig;
pub use error::{StoryError, StoryResult};
pub use progress::{GameProgress, HISTORY_WINDOW};
pub use scene::{Choice, START_SCENE, Scene, SceneTable};
pub use session::StorySession;
pub use state::{Changes, StoryState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
