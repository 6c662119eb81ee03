//! Owned story state.
//!
//! `StoryState` holds the scene table, the progress record and the crew.
//! Every mutation goes through an update method that reports which
//! persisted records it touched.

use sf_core::{Character, CharacterDraft, CharacterId, Draft};

use crate::error::StoryResult;
use crate::progress::GameProgress;
use crate::scene::{Scene, SceneTable};

/// Which persisted records an update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// The progress record changed.
    pub progress: bool,
    /// The crew record changed.
    pub crew: bool,
}

impl Changes {
    /// Nothing changed.
    pub const NONE: Changes = Changes {
        progress: false,
        crew: false,
    };
    /// Only the progress record changed.
    pub const PROGRESS: Changes = Changes {
        progress: true,
        crew: false,
    };
    /// Only the crew record changed.
    pub const CREW: Changes = Changes {
        progress: false,
        crew: true,
    };

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.progress && !self.crew
    }
}

/// The story app's state.
#[derive(Debug, Clone)]
pub struct StoryState {
    table: SceneTable,
    progress: GameProgress,
    crew: Vec<Character>,
}

impl Default for StoryState {
    fn default() -> Self {
        Self::new(SceneTable::builtin())
    }
}

impl StoryState {
    /// Fresh state at the start scene with an empty crew.
    pub fn new(table: SceneTable) -> Self {
        Self {
            table,
            progress: GameProgress::default(),
            crew: Vec::new(),
        }
    }

    /// Assemble state from loaded records. Progress pointing at a scene the
    /// table doesn't have is replaced by a fresh start.
    pub fn from_parts(table: SceneTable, progress: GameProgress, crew: Vec<Character>) -> Self {
        let progress = if table.contains(&progress.current_scene) {
            progress
        } else {
            tracing::warn!(
                scene = %progress.current_scene,
                "unknown scene in progress, starting over"
            );
            GameProgress::default()
        };
        Self {
            table,
            progress,
            crew,
        }
    }

    /// The scene table.
    pub fn table(&self) -> &SceneTable {
        &self.table
    }

    /// The progress record.
    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    /// The crew, in insertion order.
    pub fn crew(&self) -> &[Character] {
        &self.crew
    }

    /// The scene currently shown.
    pub fn current_scene(&self) -> &Scene {
        self.table
            .get(&self.progress.current_scene)
            .unwrap_or_else(|| self.table.start())
    }

    /// Whether the current scene is an ending.
    pub fn at_ending(&self) -> bool {
        self.current_scene().is_ending()
    }

    /// Find a crew member by name (case-insensitive).
    pub fn find_crew(&self, name: &str) -> Option<&Character> {
        let name = name.to_lowercase();
        self.crew.iter().find(|c| c.name.to_lowercase() == name)
    }

    /// Follow choice `index` (0-based) of the current scene.
    pub fn choose(&mut self, index: usize) -> StoryResult<Changes> {
        self.progress = self.progress.choose(&self.table, index)?;
        tracing::debug!(scene = %self.progress.current_scene, "choice taken");
        Ok(Changes::PROGRESS)
    }

    /// Jump to a scene by ID.
    pub fn goto(&mut self, scene: &str) -> StoryResult<Changes> {
        self.progress = self.progress.advance(&self.table, scene)?;
        tracing::debug!(scene, "moved to scene");
        Ok(Changes::PROGRESS)
    }

    /// Back to the start scene with an empty history. The crew is kept.
    pub fn reset_progress(&mut self) -> Changes {
        self.progress.reset();
        tracing::info!("progress reset");
        Changes::PROGRESS
    }

    /// Add a crew member from a draft. An incomplete draft is left untouched
    /// and nothing changes.
    pub fn add_crew(&mut self, draft: &mut CharacterDraft) -> Changes {
        match draft.submit() {
            Ok(member) => {
                tracing::info!(name = %member.name, "crew member added");
                self.crew.push(member);
                Changes::CREW
            }
            Err(e) => {
                tracing::debug!("crew draft ignored: {e}");
                Changes::NONE
            }
        }
    }

    /// Remove a crew member. Unknown IDs change nothing.
    pub fn remove_crew(&mut self, id: CharacterId) -> Changes {
        let before = self.crew.len();
        self.crew.retain(|c| c.id != id);
        if self.crew.len() == before {
            Changes::NONE
        } else {
            Changes::CREW
        }
    }

    /// Remove every crew member. Progress is kept.
    pub fn clear_crew(&mut self) -> Changes {
        if self.crew.is_empty() {
            return Changes::NONE;
        }
        self.crew.clear();
        tracing::info!("crew cleared");
        Changes::CREW
    }
}
