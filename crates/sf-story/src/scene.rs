//! The static scene graph.
//!
//! Scenes are nodes with display text; choices are labeled edges to other
//! scenes. The built-in table has seven scenes. Endings are scenes whose
//! only choice leads back to the start.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{StoryError, StoryResult};

/// ID of the scene every story begins with.
pub const START_SCENE: &str = "start";

/// A labeled transition to another scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Text shown to the player.
    pub label: String,
    /// ID of the scene this choice leads to.
    pub target: String,
}

/// A node in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Unique identifier.
    pub id: String,
    /// Short heading.
    pub title: String,
    /// Narrative text.
    pub text: String,
    /// Outgoing choices in display order.
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Create a scene without choices.
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.choices.push(Choice {
            label: label.into(),
            target: target.into(),
        });
        self
    }

    /// Whether this scene is an ending: its only choice restarts the story.
    pub fn is_ending(&self) -> bool {
        self.id != START_SCENE
            && self.choices.len() == 1
            && self.choices[0].target == START_SCENE
    }
}

/// The immutable set of scenes, in display order.
#[derive(Debug, Clone)]
pub struct SceneTable {
    scenes: Vec<Scene>,
    start: usize,
}

impl SceneTable {
    /// Build a table, checking that IDs are unique, the start scene exists,
    /// and every choice points at an existing scene.
    pub fn new(scenes: Vec<Scene>) -> StoryResult<Self> {
        let mut ids = HashSet::new();
        for scene in &scenes {
            if !ids.insert(scene.id.as_str()) {
                return Err(StoryError::InvalidTable(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }
        for scene in &scenes {
            for choice in &scene.choices {
                if !ids.contains(choice.target.as_str()) {
                    return Err(StoryError::InvalidTable(format!(
                        "scene '{}' has a choice leading to unknown scene '{}'",
                        scene.id, choice.target
                    )));
                }
            }
        }
        let start = scenes
            .iter()
            .position(|s| s.id == START_SCENE)
            .ok_or_else(|| StoryError::InvalidTable("missing start scene".to_string()))?;
        Ok(Self { scenes, start })
    }

    /// The built-in story: a derelict research vessel and three endings.
    pub fn builtin() -> Self {
        Self {
            scenes: builtin_scenes(),
            start: 0,
        }
    }

    /// All scenes in display order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// The scene every story begins with.
    pub fn start(&self) -> &Scene {
        &self.scenes[self.start]
    }

    /// Look up a scene by ID.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Look up a scene by ID, failing with [`StoryError::UnknownScene`].
    pub fn scene(&self, id: &str) -> StoryResult<&Scene> {
        self.get(id)
            .ok_or_else(|| StoryError::UnknownScene(id.to_string()))
    }

    /// Whether a scene with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the table is empty (never true for a valid table).
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Default for SceneTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            START_SCENE,
            "Aboard the Aurora",
            "You wake from cryosleep aboard the research vessel Aurora. Red emergency \
             lights pulse along the corridor and the ship's AI is silent. Something \
             has gone wrong.",
        )
        .with_choice("Head to the bridge", "navigation")
        .with_choice("Check engineering", "engineering"),
        Scene::new(
            "navigation",
            "The Bridge",
            "The navigation console flickers to life. Two signals blink on the star \
             map: a shimmering nebula off the port bow and a faint distress beacon \
             from a derelict freighter.",
        )
        .with_choice("Set course for the nebula", "nebula")
        .with_choice("Answer the distress beacon", "distress")
        .with_choice("Return to the cryo bay", START_SCENE),
        Scene::new(
            "engineering",
            "Engineering",
            "The reactor hums at an uneven pitch. Coolant pools on the deck and a \
             warning panel counts down to an automatic shutdown.",
        )
        .with_choice("Override the shutdown", "reactor")
        .with_choice("Leave it and go to the bridge", "navigation"),
        Scene::new(
            "distress",
            "The Derelict",
            "The freighter Kestrel drifts with its hull torn open. Life signs flicker \
             inside a sealed escape pod.",
        )
        .with_choice("Dock and open the pod", "rescue")
        .with_choice("Log the coordinates and move on", "navigation"),
        Scene::new(
            "nebula",
            "Into the Nebula",
            "Ionized gas swallows the Aurora. Instruments fail one by one until only \
             the hum of the hull remains. Your journey ends among the colors of a \
             dying star.",
        )
        .with_choice("Begin again", START_SCENE),
        Scene::new(
            "reactor",
            "Critical Mass",
            "The override holds for three seconds. Then the reactor flares white and \
             the Aurora becomes a brief new star.",
        )
        .with_choice("Begin again", START_SCENE),
        Scene::new(
            "rescue",
            "Survivors",
            "Inside the pod a pilot stirs and grips your hand. With a second crew \
             member the Aurora has a chance to make it home.",
        )
        .with_choice("Begin again", START_SCENE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let table = SceneTable::builtin();
        let rebuilt = SceneTable::new(table.scenes().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 7);
        assert_eq!(rebuilt.start().id, START_SCENE);
    }

    #[test]
    fn builtin_shape() {
        let table = SceneTable::builtin();
        assert_eq!(table.start().id, START_SCENE);
        for scene in table.scenes() {
            assert!(!scene.choices.is_empty(), "{} has no choices", scene.id);
            assert!(scene.choices.len() <= 3, "{} has too many choices", scene.id);
        }
    }

    #[test]
    fn endings() {
        let table = SceneTable::builtin();
        let mut endings: Vec<&str> = table
            .scenes()
            .iter()
            .filter(|s| s.is_ending())
            .map(|s| s.id.as_str())
            .collect();
        endings.sort();
        assert_eq!(endings, ["nebula", "reactor", "rescue"]);
    }

    #[test]
    fn lookup() {
        let table = SceneTable::builtin();
        assert_eq!(table.get("navigation").unwrap().title, "The Bridge");
        assert!(table.get("warp").is_none());
        assert!(matches!(
            table.scene("warp"),
            Err(StoryError::UnknownScene(id)) if id == "warp"
        ));
    }

    #[test]
    fn dangling_choice_rejected() {
        let scenes = vec![Scene::new(START_SCENE, "S", "s").with_choice("go", "nowhere")];
        assert!(matches!(
            SceneTable::new(scenes),
            Err(StoryError::InvalidTable(_))
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let scenes = vec![
            Scene::new(START_SCENE, "S", "s"),
            Scene::new(START_SCENE, "T", "t"),
        ];
        assert!(SceneTable::new(scenes).is_err());
    }

    #[test]
    fn missing_start_rejected() {
        let scenes = vec![Scene::new("a", "A", "a")];
        assert!(SceneTable::new(scenes).is_err());
    }
}
