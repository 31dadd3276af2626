//! Dynamic-to-static boundary for untrusted configuration data. Everything
//! here takes `serde_json::Value` and must never panic; anything that cannot
//! be coerced into a valid configuration comes back as `None`.

use serde_json::Value;

use crate::data::config::{clamp_slot, is_valid_config, ArmorConfig};
use crate::data::equip::EquippedMap;
use crate::data::ident::{base_id, compose_id, content_hash, ID_HASH_TAG};
use crate::data::key::{Acquire, Material, Part, SpecialType, StatMod, Tier};

/// Coerce an arbitrary JSON value into a valid configuration, or `None`.
///
/// Structural fields must land in their enums; passive slots go through a
/// filter-dedupe-cap pipeline (non-arrays become empty slots); the special
/// type defaults to NONE and forces its text empty; a caller-supplied id is
/// kept only when it is shaped like a two-part id, otherwise recomputed. The
/// result still has to pass the same validator as an interactive save; no
/// privileged path skips validation.
pub fn sanitize_config(raw: &Value) -> Option<ArmorConfig> {
    let obj = raw.as_object()?;

    let tier = sanitize_tier(obj.get("tier"))?;
    let acquire = obj.get("acquire").and_then(Value::as_str).and_then(Acquire::parse)?;
    let material = obj
        .get("material")
        .and_then(Value::as_str)
        .and_then(Material::parse)?;
    let part = obj.get("part").and_then(Value::as_str).and_then(Part::parse)?;

    let passive1 = sanitize_slot(obj.get("passive1"));
    let passive2 = sanitize_slot(obj.get("passive2"));

    let special_type = obj
        .get("specialType")
        .and_then(Value::as_str)
        .and_then(SpecialType::parse)
        .unwrap_or(SpecialType::None);
    let special_effect = if special_type == SpecialType::None {
        String::new()
    } else {
        obj.get("specialEffect")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    let mut cfg = ArmorConfig {
        id: String::new(),
        tier,
        acquire,
        material,
        part,
        passive1,
        passive2,
        special_type,
        special_effect,
    };

    cfg.id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if id.contains(ID_HASH_TAG) => id.to_string(),
        _ => compose_id(&base_id(&cfg.key()), &content_hash(&cfg)),
    };

    if !is_valid_config(&cfg) {
        return None;
    }
    Some(cfg)
}

/// Tiers arrive as numbers in our own exports but as strings from
/// hand-edited files; accept both.
fn sanitize_tier(value: Option<&Value>) -> Option<Tier> {
    let value = value?;
    let number = if let Some(n) = value.as_u64() {
        n
    } else if let Some(f) = value.as_f64() {
        if f.fract() != 0.0 || !(0.0..=255.0).contains(&f) {
            return None;
        }
        f as u64
    } else if let Some(s) = value.as_str() {
        s.trim().parse().ok()?
    } else {
        return None;
    };
    Tier::try_from(u8::try_from(number).ok()?).ok()
}

/// Filter a passive slot down to known tags, then dedupe and cap. Missing or
/// non-array input is an empty slot, not an error.
fn sanitize_slot(value: Option<&Value>) -> Vec<StatMod> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let tags: Vec<StatMod> = items
        .iter()
        .filter_map(Value::as_str)
        .filter_map(StatMod::parse)
        .collect();
    clamp_slot(&tags)
}

/// Coerce an `equipped` payload field-by-field: each part slot is kept only
/// when it holds a string id. Wrong shapes degrade to empty slots.
pub fn sanitize_equipped(raw: &Value) -> EquippedMap {
    let mut equipped = EquippedMap::default();
    let Some(obj) = raw.as_object() else {
        return equipped;
    };
    for part in Part::ALL {
        let id = obj
            .get(part.as_str())
            .and_then(Value::as_str)
            .map(str::to_string);
        equipped.set(part, id);
    }
    equipped
}
