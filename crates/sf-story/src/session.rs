//! Story session: state plus storage behind a text command interface.
//!
//! Every change is written through to the store before the command returns.

use sf_core::{CharacterDraft, CharacterId};

use crate::config::StoryConfig;
use crate::error::{StoryError, StoryResult};
use crate::persist;
use crate::scene::SceneTable;
use crate::state::{Changes, StoryState};
use crate::store::KeyValueStore;

/// An interactive story session backed by a key-value store.
pub struct StorySession {
    state: StoryState,
    store: Box<dyn KeyValueStore>,
    config: StoryConfig,
}

impl StorySession {
    /// Open a session on the file store in the configured data directory.
    pub fn open(config: StoryConfig) -> StoryResult<Self> {
        let store = config.file_store();
        Self::with_store(config, Box::new(store))
    }

    /// Open a session on any store, loading the saved records.
    pub fn with_store(config: StoryConfig, store: Box<dyn KeyValueStore>) -> StoryResult<Self> {
        let table = SceneTable::builtin();
        let progress = persist::load_progress(store.as_ref(), &table)?;
        let crew = persist::load_crew(store.as_ref())?;
        tracing::info!(
            scene = %progress.current_scene,
            crew = crew.len(),
            "story loaded"
        );
        Ok(Self {
            state: StoryState::from_parts(table, progress, crew),
            store,
            config,
        })
    }

    /// Get the story state.
    pub fn state(&self) -> &StoryState {
        &self.state
    }

    /// Get the session configuration.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Follow choice `index` (0-based) and save.
    pub fn choose(&mut self, index: usize) -> StoryResult<()> {
        let changes = self.state.choose(index)?;
        self.persist(changes)
    }

    /// Jump to a scene by ID and save.
    pub fn goto(&mut self, scene: &str) -> StoryResult<()> {
        let changes = self.state.goto(scene)?;
        self.persist(changes)
    }

    /// Restart the story, keeping the crew.
    pub fn reset_progress(&mut self) -> StoryResult<()> {
        let changes = self.state.reset_progress();
        self.persist(changes)
    }

    /// Add a crew member. Returns whether the draft was accepted.
    pub fn add_crew(&mut self, draft: &mut CharacterDraft) -> StoryResult<bool> {
        let changes = self.state.add_crew(draft);
        self.persist(changes)?;
        Ok(!changes.is_empty())
    }

    /// Remove a crew member. Returns whether anyone was removed.
    pub fn remove_crew(&mut self, id: CharacterId) -> StoryResult<bool> {
        let changes = self.state.remove_crew(id);
        self.persist(changes)?;
        Ok(!changes.is_empty())
    }

    /// Remove the whole crew, keeping progress.
    pub fn clear_crew(&mut self) -> StoryResult<()> {
        let changes = self.state.clear_crew();
        self.persist(changes)
    }

    fn persist(&mut self, changes: Changes) -> StoryResult<()> {
        if changes.progress {
            persist::save_progress(self.store.as_mut(), self.state.progress())?;
        }
        if changes.crew {
            persist::save_crew(self.store.as_mut(), self.state.crew())?;
        }
        Ok(())
    }

    /// Welcome text shown when the session starts.
    pub fn intro(&self) -> String {
        let mut out = String::from(
            "Story Forge: The Aurora\n\
             Assemble a crew, then find out what happened aboard the Aurora.\n",
        );
        let progress = self.state.progress();
        if progress.scenes_visited() > 0 {
            out.push_str(&format!(
                "Resuming at '{}' after {} scene(s).\n",
                self.state.current_scene().title,
                progress.scenes_visited()
            ));
        }
        out.push_str("Type 'help' for commands.");
        out
    }

    /// Render the current scene with its recent history and choices.
    pub fn render_scene(&self) -> String {
        let scene = self.state.current_scene();
        let mut out = String::new();

        let recent = self
            .state
            .progress()
            .visible_history(self.config.history_window);
        if !recent.is_empty() {
            out.push_str("Previously:\n");
            for text in recent {
                out.push_str(&format!("  ... {text}\n"));
            }
            out.push('\n');
        }

        out.push_str(&format!("== {} ==\n{}\n", scene.title, scene.text));
        for (i, choice) in scene.choices.iter().enumerate() {
            out.push_str(&format!("\n  {}. {}", i + 1, choice.label));
        }
        out
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> StoryResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        if let Ok(n) = cmd.parse::<usize>() {
            return self.do_choose(n);
        }

        match cmd.as_str() {
            "look" | "l" => Ok(self.render_scene()),
            "choose" | "c" => {
                let n = rest.parse::<usize>().map_err(|_| {
                    StoryError::InvalidInput("usage: choose <number>".to_string())
                })?;
                self.do_choose(n)
            }
            "goto" => {
                if rest.is_empty() {
                    return Err(StoryError::InvalidInput("usage: goto <scene id>".to_string()));
                }
                self.goto(rest)?;
                Ok(self.render_scene())
            }
            "history" | "h" => Ok(self.do_history()),
            "reset" => {
                self.reset_progress()?;
                Ok(format!("Story restarted.\n\n{}", self.render_scene()))
            }
            "crew" => self.do_crew(rest),
            "profile" => Ok(self.profile_text()),
            "help" => Ok(help_text()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(StoryError::UnknownCommand(cmd)),
        }
    }

    /// Summary of the player's progress and crew.
    pub fn profile_text(&self) -> String {
        let progress = self.state.progress();
        let scene = self.state.current_scene();
        let ending = if self.state.at_ending() {
            format!("yes ({})", scene.title)
        } else {
            "not yet".to_string()
        };
        [
            "Profile:".to_string(),
            format!("  Crew members:   {}", self.state.crew().len()),
            format!("  Scenes visited: {}", progress.scenes_visited()),
            format!("  Current scene:  {}", scene.title),
            format!("  Ending reached: {ending}"),
        ]
        .join("\n")
    }

    fn do_choose(&mut self, n: usize) -> StoryResult<String> {
        if n == 0 {
            return Err(StoryError::InvalidChoice(
                "choices are numbered from 1".to_string(),
            ));
        }
        self.choose(n - 1)?;
        Ok(self.render_scene())
    }

    fn do_history(&self) -> String {
        let progress = self.state.progress();
        if progress.history.is_empty() {
            return "No history yet.".to_string();
        }
        let recent = progress.visible_history(self.config.history_window);
        let mut out = format!(
            "History (last {} of {}):\n",
            recent.len(),
            progress.history.len()
        );
        for text in recent {
            out.push_str(&format!("  - {text}\n"));
        }
        out.trim_end().to_string()
    }

    fn do_crew(&mut self, rest: &str) -> StoryResult<String> {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let sub = parts[0].to_lowercase();
        let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match sub.as_str() {
            "" | "list" => Ok(self.do_list_crew()),
            "add" => {
                let fields: Vec<&str> = arg.split('|').map(str::trim).collect();
                let field = |i: usize| fields.get(i).copied().unwrap_or("");
                let mut draft = CharacterDraft::new(field(0), field(1), field(2));
                if self.add_crew(&mut draft)? {
                    Ok(format!("{} joined the crew.", field(0)))
                } else {
                    Err(StoryError::InvalidInput(
                        "usage: crew add <name> | <description> [| <emoji>]".to_string(),
                    ))
                }
            }
            "remove" | "rm" => {
                let id = self
                    .state
                    .find_crew(arg)
                    .map(|c| c.id)
                    .ok_or_else(|| StoryError::UnknownCrewMember(arg.to_string()))?;
                self.remove_crew(id)?;
                Ok(format!("{arg} left the crew."))
            }
            "clear" => {
                self.clear_crew()?;
                Ok("Crew cleared.".to_string())
            }
            _ => Err(StoryError::UnknownCommand(format!("crew {sub}"))),
        }
    }

    fn do_list_crew(&self) -> String {
        let crew = self.state.crew();
        if crew.is_empty() {
            return "No crew yet. Add someone with: crew add <name> | <description> [| <emoji>]"
                .to_string();
        }
        let mut out = format!("Crew ({}):\n", crew.len());
        for (i, c) in crew.iter().enumerate() {
            let emoji = if c.personality.is_empty() {
                String::new()
            } else {
                format!("{} ", c.personality)
            };
            out.push_str(&format!("  {}. {emoji}{} - {}\n", i + 1, c.name, c.description));
        }
        out.trim_end().to_string()
    }
}

fn help_text() -> String {
    "\
Story Commands:
  look                                          Show the current scene
  <n> / choose <n>                              Take choice n
  goto <scene id>                               Jump to a scene (see `sf scenes`)
  history                                       Show recent scenes
  reset                                         Restart the story (crew stays)
  crew                                          List the crew
  crew add <name> | <description> [| <emoji>]   Add a crew member
  crew remove <name>                            Remove a crew member
  crew clear                                    Remove the whole crew
  profile                                       Show progress summary
  help                                          Show this help
  quit                                          Exit"
        .to_string()
}
