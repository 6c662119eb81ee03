//! Terminal UI for Story Forge.
//!
//! One ratatui interface for both apps: Chat, Characters and Worlds tabs for
//! the character chat, and Home, Crew, Game and Profile tabs for the story.

use std::path::Path;

use sf_chat::ChatConfig;
use sf_story::StoryConfig;

use crate::app::{Sessions, TuiApp};
use crate::tabs::TabId;

pub mod app;
pub mod form;
pub mod logging;
pub mod shared;
pub mod tabs;
pub mod terminal;

/// Open the sessions under `data_dir` and run the TUI on `tab`.
///
/// An unknown tab name is rejected before the terminal is touched. Logs go
/// to a file in the data directory.
pub fn launch(tab: &str, seed: Option<u64>, data_dir: &Path) -> Result<(), String> {
    let tab = TabId::from_name(tab).ok_or_else(|| format!("unknown tab: {tab}"))?;
    if let Err(e) = logging::init_file_logging(data_dir) {
        eprintln!("warning: logging disabled: {e}");
    }

    let mut chat = ChatConfig::default();
    if let Some(seed) = seed {
        chat = chat.with_seed(seed);
    }
    let story = StoryConfig::default().with_data_dir(data_dir);

    let sessions =
        Sessions::open(chat, story).map_err(|e| format!("failed to open story: {e}"))?;
    terminal::run(TuiApp::new(sessions, tab))
}
