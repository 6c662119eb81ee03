//! Versioned persistence of the story records.
//!
//! Each record is wrapped as `{"version": 1, "data": ...}`. Records written
//! before versioning (the bare JSON value) are migrated on load. A missing
//! record loads as its default; a record that cannot be read falls back to
//! the default with a warning instead of aborting startup.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sf_core::{Character, CharacterId};

use crate::error::StoryResult;
use crate::progress::GameProgress;
use crate::scene::SceneTable;
use crate::store::KeyValueStore;

/// Storage key of the progress record.
pub const PROGRESS_KEY: &str = "gameProgress";
/// Storage key of the crew record.
pub const CHARACTERS_KEY: &str = "characters";
/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: Value,
}

/// A crew entry as stored by any schema version.
///
/// Older records use timestamp strings as IDs and keep the emoji in its own
/// field; those get a fresh ID and the emoji moves into `personality`.
#[derive(Deserialize)]
struct StoredCrewMember {
    #[serde(default)]
    id: Value,
    name: String,
    description: String,
    #[serde(default)]
    personality: String,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl From<StoredCrewMember> for Character {
    fn from(stored: StoredCrewMember) -> Self {
        let id = serde_json::from_value::<CharacterId>(stored.id).unwrap_or_else(|_| {
            tracing::debug!(
                name = %stored.name,
                "crew member without a valid ID, minting one"
            );
            CharacterId::new()
        });
        let personality = match stored.emoji {
            Some(emoji) if stored.personality.is_empty() => emoji,
            _ => stored.personality,
        };
        Character {
            id,
            name: stored.name,
            description: stored.description,
            personality,
            avatar: stored.avatar,
        }
    }
}

/// Save the progress record.
pub fn save_progress(store: &mut dyn KeyValueStore, progress: &GameProgress) -> StoryResult<()> {
    save(store, PROGRESS_KEY, progress)
}

/// Load the progress record, validating its scene against the table.
pub fn load_progress(store: &dyn KeyValueStore, table: &SceneTable) -> StoryResult<GameProgress> {
    let Some(progress) = load::<GameProgress>(store, PROGRESS_KEY)? else {
        return Ok(GameProgress::default());
    };
    if !table.contains(&progress.current_scene) {
        tracing::warn!(
            scene = %progress.current_scene,
            "stored progress points at an unknown scene, starting over"
        );
        return Ok(GameProgress::default());
    }
    Ok(progress)
}

/// Save the crew record. An empty crew removes the record.
pub fn save_crew(store: &mut dyn KeyValueStore, crew: &[Character]) -> StoryResult<()> {
    if crew.is_empty() {
        store.remove(CHARACTERS_KEY)?;
        tracing::debug!(key = CHARACTERS_KEY, "record removed");
        return Ok(());
    }
    save(store, CHARACTERS_KEY, crew)
}

/// Load the crew record.
pub fn load_crew(store: &dyn KeyValueStore) -> StoryResult<Vec<Character>> {
    let stored = load::<Vec<StoredCrewMember>>(store, CHARACTERS_KEY)?.unwrap_or_default();
    Ok(stored.into_iter().map(Character::from).collect())
}

fn save<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    data: &T,
) -> StoryResult<()> {
    let json = serde_json::to_string_pretty(&EnvelopeRef {
        version: SCHEMA_VERSION,
        data,
    })?;
    store.set(key, &json)?;
    tracing::debug!(key, "record saved");
    Ok(())
}

/// Read and decode a record. `Ok(None)` means "use the default".
fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> StoryResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    Ok(decode(key, &raw))
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, "stored record is not valid JSON, using default: {e}");
            return None;
        }
    };

    let is_envelope = value
        .as_object()
        .is_some_and(|o| o.contains_key("version") && o.contains_key("data"));

    let data = if is_envelope {
        match serde_json::from_value::<Envelope>(value) {
            Ok(Envelope {
                version: SCHEMA_VERSION,
                data,
            }) => data,
            Ok(Envelope { version, .. }) => {
                tracing::warn!(key, version, "unsupported record version, using default");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, "malformed record envelope, using default: {e}");
                return None;
            }
        }
    } else {
        tracing::info!(key, "migrating unversioned record");
        value
    };

    match serde_json::from_value(data) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(key, "stored record has the wrong shape, using default: {e}");
            None
        }
    }
}
