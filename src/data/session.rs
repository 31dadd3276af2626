//! Owned session state (store + equipped map) and its snapshot persistence.
//! The snapshot is read once at startup and written after every mutation;
//! a missing or unreadable snapshot means an empty session, never an error.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::config::ArmorConfig;
use crate::data::equip::EquippedMap;
use crate::data::key::Part;
use crate::data::store::ConfigStore;

pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub store: ConfigStore,
    pub equipped: EquippedMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipError {
    UnknownId,
}

impl fmt::Display for EquipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId => write!(f, "no saved configuration with that id"),
        }
    }
}

impl std::error::Error for EquipError {}

impl Session {
    /// Delete a configuration and cascade the equipped-map cleanup, so equip
    /// state never references a deleted id.
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        if removed {
            self.equipped.clear_id(id);
        }
        removed
    }

    /// Clear the store, the saved-id set and the equipped map. Irreversible;
    /// callers gate this behind explicit confirmation.
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.equipped.clear();
    }

    /// Equip a saved configuration into its own part's slot, replacing
    /// whatever was there.
    pub fn equip(&mut self, id: &str) -> Result<Part, EquipError> {
        let part = self.store.get(id).map(|cfg| cfg.part).ok_or(EquipError::UnknownId)?;
        self.equipped.set(part, Some(id.to_string()));
        Ok(part)
    }

    pub fn unequip(&mut self, part: Part) -> bool {
        let had = self.equipped.get(part).is_some();
        self.equipped.set(part, None);
        had
    }

    pub fn clear_equipped(&mut self) {
        self.equipped.clear();
    }
}

/// On-disk shape of a session: `{store, savedIds, equipped}`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSnapshot {
    #[serde(default)]
    store: HashMap<String, ArmorConfig>,
    #[serde(default)]
    saved_ids: Vec<String>,
    #[serde(default)]
    equipped: EquippedMap,
}

/// Load a session snapshot. Missing file means a fresh session; a corrupt
/// one is logged and also treated as fresh. Store invariants (key == id,
/// saved set ⊆ keys, equipped parts matching their configs) are re-enforced
/// so a hand-edited snapshot cannot poison the in-memory state.
pub fn load_session(path: impl AsRef<Path>) -> Session {
    let path = path.as_ref();
    if !path.exists() {
        return Session::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("session read failed ({}): {err}", path.display());
            return Session::default();
        }
    };
    let snapshot: SessionSnapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("session parse failed ({}): {err}", path.display());
            return Session::default();
        }
    };

    let store = ConfigStore::from_parts(snapshot.store, snapshot.saved_ids);
    let mut equipped = snapshot.equipped;
    for part in Part::ALL {
        let mismatched = equipped
            .get(part)
            .and_then(|id| store.get(id))
            .is_some_and(|cfg| cfg.part != part);
        if mismatched {
            equipped.set(part, None);
        }
    }

    Session { store, equipped }
}

/// Best-effort snapshot write: failures are logged and swallowed, the
/// in-memory session stays the source of truth.
pub fn save_session(path: impl AsRef<Path>, session: &Session) {
    let path = path.as_ref();
    let snapshot = SessionSnapshot {
        store: session.store.configs().clone(),
        saved_ids: {
            let mut ids: Vec<String> = session.store.saved_ids().iter().cloned().collect();
            ids.sort();
            ids
        },
        equipped: session.equipped.clone(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                eprintln!("session save failed ({}): {err}", path.display());
                return;
            }
        }
    }
    let serialized = match serde_json::to_string_pretty(&snapshot) {
        Ok(serialized) => serialized,
        Err(err) => {
            eprintln!("session serialize failed: {err}");
            return;
        }
    };
    if let Err(err) = fs::write(path, serialized) {
        eprintln!("session save failed ({}): {err}", path.display());
    }
}
