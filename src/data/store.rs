//! In-memory configuration store: id -> configuration map plus the set of
//! saved ids. Save is an upsert keyed by the recomputed content identity, so
//! re-saving an unchanged draft never grows the store.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::data::config::{is_valid_config, ArmorConfig};
use crate::data::ident::unique_id;

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    configs: HashMap<String, ArmorConfig>,
    saved_ids: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: String,
    /// True when the recomputed id already existed: the save updated an
    /// existing version rather than minting a new one.
    pub was_update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveError {
    Invalid,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(
                f,
                "configuration is not savable: passive slot 1 needs 1-2 tags and a \
                 non-NONE special type needs effect text"
            ),
        }
    }
}

impl std::error::Error for SaveError {}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from snapshot parts, re-enforcing the invariants the
    /// snapshot may have lost: map keys must equal their value's id, and the
    /// saved-id set must be a subset of the map keys.
    pub fn from_parts(configs: HashMap<String, ArmorConfig>, saved_ids: Vec<String>) -> Self {
        let configs: HashMap<String, ArmorConfig> = configs
            .into_iter()
            .filter(|(id, cfg)| *id == cfg.id)
            .collect();
        let saved_ids = saved_ids
            .into_iter()
            .filter(|id| configs.contains_key(id))
            .collect();
        Self { configs, saved_ids }
    }

    /// Validate, normalize and upsert a draft. The draft's own `id` field is
    /// ignored; the identity is always recomputed from the payload.
    pub fn save(&mut self, draft: &ArmorConfig) -> Result<SaveOutcome, SaveError> {
        let mut cfg = draft.normalized();
        if !is_valid_config(&cfg) {
            return Err(SaveError::Invalid);
        }
        let id = unique_id(&cfg);
        cfg.id = id.clone();

        let was_update = self.saved_ids.contains(&id);
        self.configs.insert(id.clone(), cfg);
        self.saved_ids.insert(id.clone());
        Ok(SaveOutcome { id, was_update })
    }

    /// Upsert an already-sanitized configuration under its own id. Used by
    /// import reconciliation, where well-shaped caller ids are kept as-is.
    pub fn insert_imported(&mut self, cfg: ArmorConfig) {
        let id = cfg.id.clone();
        self.configs.insert(id.clone(), cfg);
        self.saved_ids.insert(id);
    }

    /// Remove one configuration. Returns whether anything was removed. The
    /// caller cascades any equipped-map cleanup; the store does not own it.
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.configs.remove(id).is_some();
        self.saved_ids.remove(id);
        removed
    }

    pub fn reset_all(&mut self) {
        self.configs.clear();
        self.saved_ids.clear();
    }

    /// Replace the entire contents with the given configurations, keyed by
    /// their own ids.
    pub fn replace_all(&mut self, incoming: Vec<ArmorConfig>) {
        self.configs.clear();
        self.saved_ids.clear();
        for cfg in incoming {
            self.insert_imported(cfg);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ArmorConfig> {
        self.configs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.saved_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn configs(&self) -> &HashMap<String, ArmorConfig> {
        &self.configs
    }

    pub fn saved_ids(&self) -> &HashSet<String> {
        &self.saved_ids
    }

    /// Saved configurations in the canonical total order: tier, acquisition
    /// route, material, part, then id as the final tiebreak. Independent of
    /// insertion history.
    pub fn list_saved(&self) -> Vec<&ArmorConfig> {
        let mut list: Vec<&ArmorConfig> = self
            .saved_ids
            .iter()
            .filter_map(|id| self.configs.get(id))
            .collect();
        list.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then_with(|| a.acquire.cmp(&b.acquire))
                .then_with(|| a.material.cmp(&b.material))
                .then_with(|| a.part.cmp(&b.part))
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }
}
