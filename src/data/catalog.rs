//! Authoring catalog: which acquisition routes exist per tier, and the
//! fixture pool of special-effect strings the editor offers for dragging.
//! Availability drives UI option filtering only; the validator deliberately
//! never rejects a configuration by availability, so data saved under an
//! earlier revision of this table still imports.

use crate::data::key::{Acquire, Tier};

/// Basic crafting exists at tier 1 only; higher tiers acquire gear through
/// the other three routes.
pub fn route_available(tier: Tier, acquire: Acquire) -> bool {
    match tier {
        Tier::T1 => acquire == Acquire::BasicCraft,
        Tier::T2 | Tier::T3 => acquire != Acquire::BasicCraft,
    }
}

pub fn routes_for_tier(tier: Tier) -> Vec<Acquire> {
    Acquire::ALL
        .iter()
        .copied()
        .filter(|&acquire| route_available(tier, acquire))
        .collect()
}

/// Special-effect strings offered in the authoring pool. Free text as far as
/// the identity scheme is concerned; the trailing category hint mirrors the
/// droppable's default special type.
pub const SPECIAL_EFFECT_POOL: &[&str] = &[
    "Recover health when struck (Proc Passive)",
    "Gain defense when struck (Proc Passive)",
    "Gain move speed when struck (Proc Passive)",
    "Recover health on enemy kill (Proc Passive)",
    "Gain attack speed on attack (Proc Passive)",
    "Gain attack power on attack (Proc Passive)",
    "Gain skill haste on attack (Proc Passive)",
    "Recover mana on skill attack (Proc Passive)",
    "Gain a barrier when stunned (Proc Passive)",
    "Increased health regen below 50% health (Proc Passive)",
    "Gain attack power below 30% health (Proc Passive)",
    "Gain critical chance when struck (Proc Passive)",
    "Gain critical damage on enemy kill (Proc Passive)",
    "Recover health on attack (Proc Passive)",
    "Gain critical chance at full health (Proc Passive)",
    "Recover mana on enemy kill (Proc Passive)",
    "Instantly gain a shield (Active)",
    "Instantly recover health (Active)",
    "Brief attack speed boost (Active)",
];
