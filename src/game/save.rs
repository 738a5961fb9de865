// Save/restore of actor state
//
// Each saveable actor contributes one opaque value: a health scalar or a
// position. The store keys them by actor id and persists the map as RON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use glam::Vec2;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::core::{CapabilityError, SaveError};

/// One actor's persisted state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SaveState {
    Health(f32),
    Position(Vec2),
}

impl SaveState {
    /// Short name of the variant, used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Health(_) => "health",
            Self::Position(_) => "position",
        }
    }
}

/// Something that can be captured into and restored from a `SaveState`
pub trait Saveable {
    fn capture_state(&self) -> SaveState;
    fn restore_state(&mut self, state: SaveState) -> Result<(), CapabilityError>;
}

/// Saved states keyed by actor id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveStore {
    entries: BTreeMap<String, SaveState>,
}

impl SaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture an actor's state under `id`, replacing any previous entry
    pub fn capture(&mut self, id: &str, actor: &dyn Saveable) {
        let state = actor.capture_state();
        log::debug!("Captured {} state for {id}", state.kind());
        self.entries.insert(id.to_string(), state);
    }

    /// Restore an actor from the entry under `id`
    pub fn restore(&self, id: &str, actor: &mut dyn Saveable) -> Result<(), SaveError> {
        let state = self
            .entries
            .get(id)
            .copied()
            .ok_or_else(|| SaveError::MissingEntry(id.to_string()))?;
        actor.restore_state(state)?;
        log::debug!("Restored {} state for {id}", state.kind());
        Ok(())
    }

    /// Look up a raw entry
    pub fn get(&self, id: &str) -> Option<SaveState> {
        self.entries.get(id).copied()
    }

    /// Number of saved actors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a RON string
    pub fn to_ron(&self) -> Result<String, SaveError> {
        ron::ser::to_string_pretty(self, PrettyConfig::default())
            .map_err(|e| SaveError::Serialize(e.to_string()))
    }

    /// Parse from a RON string
    pub fn from_ron(text: &str) -> Result<Self, SaveError> {
        ron::from_str(text).map_err(|e| SaveError::Parse(e.to_string()))
    }

    /// Write the store to disk
    pub fn save_to_file(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, self.to_ron()?)?;
        log::info!("Saved {} actor states to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a store from disk
    pub fn load_from_file(path: &Path) -> Result<Self, SaveError> {
        let text = fs::read_to_string(path)?;
        let store = Self::from_ron(&text)?;
        log::info!("Loaded {} actor states from {}", store.len(), path.display());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal position-only saveable
    struct Marker(Vec2);

    impl Saveable for Marker {
        fn capture_state(&self) -> SaveState {
            SaveState::Position(self.0)
        }

        fn restore_state(&mut self, state: SaveState) -> Result<(), CapabilityError> {
            match state {
                SaveState::Position(p) => {
                    self.0 = p;
                    Ok(())
                }
                other => Err(CapabilityError::StateMismatch {
                    expected: "position",
                    actual: other.kind(),
                }),
            }
        }
    }

    #[test]
    fn test_capture_and_restore() {
        let mut store = SaveStore::new();
        store.capture("player", &Marker(Vec2::new(3.0, 4.0)));

        let mut marker = Marker(Vec2::ZERO);
        assert!(store.restore("player", &mut marker).is_ok());
        assert_eq!(marker.0, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_missing_entry() {
        let store = SaveStore::new();
        let mut marker = Marker(Vec2::ZERO);
        assert!(matches!(
            store.restore("ghost", &mut marker),
            Err(SaveError::MissingEntry(_))
        ));
    }

    #[test]
    fn test_mismatched_kind() {
        let mut store = SaveStore::new();
        store.entries.insert("player".into(), SaveState::Health(3.0));
        let mut marker = Marker(Vec2::ZERO);
        assert!(matches!(
            store.restore("player", &mut marker),
            Err(SaveError::Capability(_))
        ));
    }

    #[test]
    fn test_ron_text() {
        let mut store = SaveStore::new();
        store.capture("player", &Marker(Vec2::new(1.5, -2.0)));
        store.entries.insert("ghost_0".into(), SaveState::Health(0.0));

        let text = store.to_ron().unwrap();
        let parsed = SaveStore::from_ron(&text).unwrap();
        assert_eq!(parsed, store);
        assert_eq!(parsed.get("ghost_0"), Some(SaveState::Health(0.0)));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SaveStore::from_ron("not ron at all ("),
            Err(SaveError::Parse(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "rusted_platformer_save_{}.ron",
            std::process::id()
        ));
        let mut store = SaveStore::new();
        store.capture("player", &Marker(Vec2::new(9.0, 1.0)));
        store.save_to_file(&path).unwrap();

        let loaded = SaveStore::load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, store);
    }
}
