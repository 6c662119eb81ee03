//! Configuration for a story session.

use std::path::PathBuf;

use crate::progress::HISTORY_WINDOW;
use crate::store::FileStore;

/// Default directory for persisted records, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".story-forge";

/// Configuration for a story session.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Directory holding the persisted records.
    pub data_dir: PathBuf,
    /// How many past scenes front ends display.
    pub history_window: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            history_window: HISTORY_WINDOW,
        }
    }
}

impl StoryConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the displayed history window (at least 1).
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.max(1);
        self
    }

    /// Open a file store rooted at the data directory.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}
