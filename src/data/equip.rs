//! Equipped map and the read-only projection over it: per-part resolution
//! against the store and counted effect aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::config::ArmorConfig;
use crate::data::key::{Part, SpecialType};
use crate::data::store::ConfigStore;

/// One slot per body part, each empty or holding a configuration id.
/// Serialized as `{"Armor": id|null, ...}` to match the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedMap {
    #[serde(default, rename = "Armor")]
    pub armor: Option<String>,
    #[serde(default, rename = "Helm")]
    pub helm: Option<String>,
    #[serde(default, rename = "Gloves")]
    pub gloves: Option<String>,
    #[serde(default, rename = "Shoes")]
    pub shoes: Option<String>,
}

impl EquippedMap {
    pub fn get(&self, part: Part) -> Option<&str> {
        self.slot(part).as_deref()
    }

    pub fn set(&mut self, part: Part, id: Option<String>) {
        *self.slot_mut(part) = id;
    }

    /// Clear every slot referencing the given id. Used when a configuration
    /// is deleted so equip state never outlives its referent.
    pub fn clear_id(&mut self, id: &str) {
        for part in Part::ALL {
            if self.get(part) == Some(id) {
                self.set(part, None);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = EquippedMap::default();
    }

    /// Drop every entry whose id fails the predicate.
    pub fn retain_ids<F: Fn(&str) -> bool>(&mut self, keep: F) {
        for part in Part::ALL {
            if self.get(part).is_some_and(|id| !keep(id)) {
                self.set(part, None);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        Part::ALL.iter().all(|&part| self.get(part).is_none())
    }

    fn slot(&self, part: Part) -> &Option<String> {
        match part {
            Part::Armor => &self.armor,
            Part::Helm => &self.helm,
            Part::Gloves => &self.gloves,
            Part::Shoes => &self.shoes,
        }
    }

    fn slot_mut(&mut self, part: Part) -> &mut Option<String> {
        match part {
            Part::Armor => &mut self.armor,
            Part::Helm => &mut self.helm,
            Part::Gloves => &mut self.gloves,
            Part::Shoes => &mut self.shoes,
        }
    }
}

/// Resolve each equipped slot against the store. A reference to an id the
/// store no longer holds resolves to an empty slot rather than an error; the
/// equip map and the store are allowed to drift (e.g. after a replace
/// import) and this is the self-healing read path.
pub fn resolve_equipped<'a>(
    equipped: &EquippedMap,
    store: &'a ConfigStore,
) -> Vec<(Part, Option<&'a ArmorConfig>)> {
    Part::ALL
        .iter()
        .map(|&part| (part, equipped.get(part).and_then(|id| store.get(id))))
        .collect()
}

/// One aggregated effect line: a label and how many equipped parts carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectCount {
    pub label: String,
    pub count: u32,
}

/// Aggregated view over up to four resolved configurations, split by effect
/// category. Each list is sorted by descending count, ties broken by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedEffects {
    pub stat_mods: Vec<EffectCount>,
    pub proc_effects: Vec<EffectCount>,
    pub active_effects: Vec<EffectCount>,
}

/// Count every passive tag and special effect across the resolved parts.
/// Stat tags are keyed by their identifier; special effects by their trimmed
/// text, so textually identical effects on different parts accumulate.
pub fn aggregate_effects(resolved: &[(Part, Option<&ArmorConfig>)]) -> AggregatedEffects {
    let mut stat_counts: BTreeMap<&str, u32> = BTreeMap::new();
    let mut proc_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut active_counts: BTreeMap<String, u32> = BTreeMap::new();

    for (_, cfg) in resolved {
        let Some(cfg) = cfg else { continue };

        for tag in cfg.passive1.iter().chain(cfg.passive2.iter()) {
            *stat_counts.entry(tag.as_str()).or_default() += 1;
        }

        let text = cfg.special_effect.trim();
        if text.is_empty() {
            continue;
        }
        match cfg.special_type {
            SpecialType::ProcPassive => *proc_counts.entry(text.to_string()).or_default() += 1,
            SpecialType::Active => *active_counts.entry(text.to_string()).or_default() += 1,
            SpecialType::None => {}
        }
    }

    AggregatedEffects {
        stat_mods: to_sorted_list(stat_counts.into_iter().map(|(k, v)| (k.to_string(), v))),
        proc_effects: to_sorted_list(proc_counts),
        active_effects: to_sorted_list(active_counts),
    }
}

fn to_sorted_list(counts: impl IntoIterator<Item = (String, u32)>) -> Vec<EffectCount> {
    let mut list: Vec<EffectCount> = counts
        .into_iter()
        .map(|(label, count)| EffectCount { label, count })
        .collect();
    list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    list
}
