//! GeoClicker save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current save format. Bump when adding fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still readable. Bump only on
//!   breaking changes such as removing a field or changing its meaning.
//!
//! Missing fields take the new-game values and unknown fields are ignored.
//! Loading never fails: corrupt data is discarded for a fresh state.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::catalog::find_upgrade;
use crate::error::EngineError;
use crate::state::{Boost, GameState, Timestamp};

/// Save format version.
pub const SAVE_VERSION: u32 = 1;

/// Oldest save format that still loads.
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Serialized save envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub game: GameSave,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSave {
    pub score: f64,
    pub per_action_gain: f64,
    pub per_time_gain: f64,
    pub owned_upgrades: BTreeMap<String, u32>,
    pub active_boosts: Vec<Boost>,
    /// Missing means "now" on load, so no offline credit is granted.
    pub last_observed: Option<Timestamp>,
}

impl Default for GameSave {
    /// Same values as a new game, so partial blobs load as one.
    fn default() -> Self {
        let fresh = GameState::new(0);
        Self {
            score: fresh.score,
            per_action_gain: fresh.per_action_gain,
            per_time_gain: fresh.per_time_gain,
            owned_upgrades: fresh.owned_upgrades,
            active_boosts: fresh.active_boosts,
            last_observed: None,
        }
    }
}

/// Key-value store holding the serialized state.
pub trait SaveStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), EngineError>;
    fn remove(&mut self, key: &str);
}

/// In-memory store for native runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    /// Reject every write (simulates a full or disabled storage).
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        if self.fail_writes {
            return Err(EngineError::Storage(format!("write to `{key}` rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser localStorage. Only available on wasm.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        let storage = Self::storage()
            .ok_or_else(|| EngineError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| EngineError::Storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Snapshot `state` for serialization.
pub fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            score: state.score,
            per_action_gain: state.per_action_gain,
            per_time_gain: state.per_time_gain,
            owned_upgrades: state.owned_upgrades.clone(),
            active_boosts: state.active_boosts.clone(),
            last_observed: Some(state.last_observed),
        },
    }
}

/// Restore `save` into `state`. Upgrades missing from the catalog are
/// dropped and catalog upgrades missing from the save own zero.
pub fn apply_save(state: &mut GameState, save: &GameSave, now: Timestamp) {
    state.score = save.score;
    state.per_action_gain = save.per_action_gain;
    state.per_time_gain = save.per_time_gain;

    state.owned_upgrades.clear();
    for (id, &count) in &save.owned_upgrades {
        if find_upgrade(id).is_ok() {
            state.owned_upgrades.insert(id.clone(), count);
        } else {
            warn!("GeoClicker: dropping unknown upgrade `{id}` from save");
        }
    }
    state.ensure_catalog_entries();

    state.active_boosts = save.active_boosts.clone();
    state.last_observed = save.last_observed.unwrap_or(now);
}

pub fn serialize(state: &GameState) -> Result<String, EngineError> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// Parse a blob into a fresh state. Missing fields take defaults.
pub fn deserialize(json: &str, now: Timestamp) -> Result<GameState, EngineError> {
    let data: SaveData = serde_json::from_str(json)?;
    if data.version < MIN_COMPATIBLE_VERSION {
        return Err(EngineError::IncompatibleSaveVersion {
            saved: data.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    let mut state = GameState::new(now);
    apply_save(&mut state, &data.game, now);
    Ok(state)
}

/// Load the state under `key`. Absent, corrupt or too-old data yields a new
/// game, and anything unreadable is removed from the store.
pub fn load_state<S: SaveStore + ?Sized>(store: &mut S, key: &str, now: Timestamp) -> GameState {
    let json = match store.read(key) {
        Some(j) => j,
        None => return GameState::new(now),
    };
    match deserialize(&json, now) {
        Ok(state) => state,
        Err(e) => {
            warn!("GeoClicker: failed to load save, resetting: {e}");
            store.remove(key);
            GameState::new(now)
        }
    }
}

/// Stamp `last_observed` with `now` and write. Failures are only logged.
pub fn save_state<S: SaveStore + ?Sized>(store: &mut S, key: &str, state: &mut GameState, now: Timestamp) {
    state.last_observed = now;
    let result = serialize(state).and_then(|json| store.write(key, &json));
    if let Err(e) = result {
        warn!("GeoClicker: save failed: {e}");
    }
}
