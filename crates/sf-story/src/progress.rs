//! Game progress: where the player is and what they have seen.
//!
//! Transitions are a pure table walk. The same choice from the same scene
//! always produces the same result.

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::scene::{START_SCENE, Scene, SceneTable};

/// Number of past scenes front ends show under the current one.
pub const HISTORY_WINDOW: usize = 3;

/// The persisted progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    /// ID of the scene currently shown.
    pub current_scene: String,
    /// Texts of previously shown scenes, oldest first.
    pub history: Vec<String>,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self {
            current_scene: START_SCENE.to_string(),
            history: Vec::new(),
        }
    }
}

impl GameProgress {
    /// Progress at the start of the story.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `target`, appending the current scene's text to the history.
    pub fn advance(&self, table: &SceneTable, target: &str) -> StoryResult<GameProgress> {
        let current = table.scene(&self.current_scene)?;
        table.scene(target)?;

        let mut history = self.history.clone();
        history.push(current.text.clone());
        Ok(GameProgress {
            current_scene: target.to_string(),
            history,
        })
    }

    /// Follow choice `index` (0-based) of the current scene.
    pub fn choose(&self, table: &SceneTable, index: usize) -> StoryResult<GameProgress> {
        let current = table.scene(&self.current_scene)?;
        let choice = current.choices.get(index).ok_or_else(|| {
            StoryError::InvalidChoice(format!(
                "'{}' has {} choice(s), got {}",
                current.title,
                current.choices.len(),
                index.saturating_add(1)
            ))
        })?;
        self.advance(table, &choice.target)
    }

    /// Return to the start scene and forget the history.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The scene currently shown.
    pub fn current<'a>(&self, table: &'a SceneTable) -> StoryResult<&'a Scene> {
        table.scene(&self.current_scene)
    }

    /// The last `window` history entries, oldest first.
    pub fn visible_history(&self, window: usize) -> &[String] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    /// Number of scenes left behind so far.
    pub fn scenes_visited(&self) -> usize {
        self.history.len()
    }
}
