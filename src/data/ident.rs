//! Two-part configuration identity: a structural base id derived from the
//! slot key, plus a content hash over a canonical signature of the effect
//! payload. The hash is order-insensitive within each passive slot (tags are
//! sorted before joining) and sensitive to slot assignment, special type and
//! trimmed special-effect text.

use crate::data::config::ArmorConfig;
use crate::data::key::{SlotKey, StatMod};

/// Marker that separates the base id from the hash segment. `|` appears in
/// no enum wire name, so the split is unambiguous.
pub const ID_HASH_TAG: &str = "|h";

const HASH_HEX_WIDTH: usize = 8;
const VERSION_LABEL_WIDTH: usize = 6;

/// Structural identity of a slot: `T{tier}|{ROUTE}|{Material}|{Part}`.
/// Distinct keys always yield distinct strings.
pub fn base_id(key: &SlotKey) -> String {
    format!(
        "T{}|{}|{}|{}",
        key.tier.as_u8(),
        key.acquire.as_str(),
        key.material.as_str(),
        key.part.as_str()
    )
}

/// Canonical signature of the effect payload. Each passive slot is sorted
/// lexicographically before joining, so insertion order never affects
/// identity; the special-effect text is trimmed for the same reason.
pub fn signature(cfg: &ArmorConfig) -> String {
    format!(
        "p1:{}|p2:{}|st:{}|se:{}",
        normalized_slot(&cfg.passive1),
        normalized_slot(&cfg.passive2),
        cfg.special_type.as_str(),
        cfg.special_effect.trim()
    )
}

fn normalized_slot(slot: &[StatMod]) -> String {
    let mut tags: Vec<&str> = slot.iter().map(|tag| tag.as_str()).collect();
    tags.sort_unstable();
    tags.join(",")
}

/// DJB2-style rolling hash over UTF-16 code units, matching the behavior
/// contract of the original tool's exports.
fn hash_str(input: &str) -> u32 {
    let mut hash: u32 = 5381;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(33) ^ u32::from(unit);
    }
    hash
}

/// Fixed-width hex digest of the canonical signature.
pub fn content_hash(cfg: &ArmorConfig) -> String {
    let digest = format!("{:08X}", hash_str(&signature(cfg)));
    digest[..HASH_HEX_WIDTH].to_string()
}

pub fn compose_id(base: &str, hash: &str) -> String {
    format!("{base}{ID_HASH_TAG}{hash}")
}

/// Full identity of a configuration, recomputed from its own key and payload.
pub fn unique_id(cfg: &ArmorConfig) -> String {
    compose_id(&base_id(&cfg.key()), &content_hash(cfg))
}

/// Split a unique id back into (base id, content hash). Returns `None` for
/// malformed ids instead of panicking; callers treat that as "not an id".
pub fn decompose_id(id: &str) -> Option<(&str, &str)> {
    let (base, hash) = id.rsplit_once(ID_HASH_TAG)?;
    if base.is_empty() || hash.is_empty() {
        return None;
    }
    Some((base, hash))
}

/// Short human-facing version tag: the leading hex of the hash segment.
pub fn version_label(id: &str) -> Option<&str> {
    let (_, hash) = decompose_id(id)?;
    if hash.len() > VERSION_LABEL_WIDTH {
        Some(&hash[..VERSION_LABEL_WIDTH])
    } else {
        Some(hash)
    }
}
