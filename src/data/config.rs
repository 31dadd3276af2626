//! Armor configuration record and its payload invariants.

use serde::{Deserialize, Serialize};

use crate::data::key::{Acquire, Material, Part, SlotKey, SpecialType, StatMod, Tier};

/// Maximum number of distinct tags a passive slot can hold, regardless of
/// how many drops occur.
pub const SLOT_CAP: usize = 2;

/// A saved or draft armor configuration. `id` is derived, never chosen:
/// drafts carry an empty string and saving recomputes it from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorConfig {
    #[serde(default)]
    pub id: String,
    pub tier: Tier,
    pub acquire: Acquire,
    pub material: Material,
    pub part: Part,
    #[serde(default)]
    pub passive1: Vec<StatMod>,
    #[serde(default)]
    pub passive2: Vec<StatMod>,
    #[serde(default)]
    pub special_type: SpecialType,
    #[serde(default)]
    pub special_effect: String,
}

impl ArmorConfig {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            tier: self.tier,
            acquire: self.acquire,
            material: self.material,
            part: self.part,
        }
    }

    /// Payload normalization applied on every persist path: both slots are
    /// deduplicated and capped, and a NONE special type forces empty text.
    pub fn normalized(&self) -> ArmorConfig {
        let special_effect = if self.special_type == SpecialType::None {
            String::new()
        } else {
            self.special_effect.clone()
        };
        ArmorConfig {
            id: self.id.clone(),
            tier: self.tier,
            acquire: self.acquire,
            material: self.material,
            part: self.part,
            passive1: clamp_slot(&self.passive1),
            passive2: clamp_slot(&self.passive2),
            special_type: self.special_type,
            special_effect,
        }
    }
}

/// Deduplicate a passive slot (first occurrence wins) and cap it at
/// [`SLOT_CAP`] tags.
pub fn clamp_slot(slot: &[StatMod]) -> Vec<StatMod> {
    let mut out: Vec<StatMod> = Vec::with_capacity(SLOT_CAP);
    for &tag in slot {
        if !out.contains(&tag) {
            out.push(tag);
            if out.len() == SLOT_CAP {
                break;
            }
        }
    }
    out
}

fn slot_is_distinct(slot: &[StatMod]) -> bool {
    slot.iter()
        .enumerate()
        .all(|(index, tag)| !slot[..index].contains(tag))
}

/// Pure payload validation, used both as the pre-save gate and as the
/// post-sanitize filter during import. A NONE special type is valid with any
/// text (the text is discarded on persist); any other type requires
/// non-empty trimmed text.
pub fn is_valid_config(cfg: &ArmorConfig) -> bool {
    let p1_ok = (1..=SLOT_CAP).contains(&cfg.passive1.len()) && slot_is_distinct(&cfg.passive1);
    let p2_ok = cfg.passive2.len() <= SLOT_CAP && slot_is_distinct(&cfg.passive2);
    let special_ok = match cfg.special_type {
        SpecialType::None => true,
        _ => !cfg.special_effect.trim().is_empty(),
    };
    p1_ok && p2_ok && special_ok
}
