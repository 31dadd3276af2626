//! Closed tag sets for the armor design space. Wire names are fixed;
//! changing any of them is a data-revision event, not a runtime concern.
//! Declaration order of the route/material/part enums is the canonical
//! display and sort order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Armor tier. Serialized as a bare number (1..=3) to match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    T1 = 1,
    T2 = 2,
    T3 = 3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::T1, Tier::T2, Tier::T3];

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::T1),
            2 => Ok(Tier::T2),
            3 => Ok(Tier::T3),
            other => Err(format!("tier must be 1, 2 or 3, got {other}")),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Acquisition route of a gear slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Acquire {
    BasicCraft,
    LootCraft,
    DungeonCore,
    BossDrop,
}

impl Acquire {
    pub const ALL: [Acquire; 4] = [
        Acquire::BasicCraft,
        Acquire::LootCraft,
        Acquire::DungeonCore,
        Acquire::BossDrop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Acquire::BasicCraft => "BASIC_CRAFT",
            Acquire::LootCraft => "LOOT_CRAFT",
            Acquire::DungeonCore => "DUNGEON_CORE",
            Acquire::BossDrop => "BOSS_DROP",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BASIC_CRAFT" => Some(Acquire::BasicCraft),
            "LOOT_CRAFT" => Some(Acquire::LootCraft),
            "DUNGEON_CORE" => Some(Acquire::DungeonCore),
            "BOSS_DROP" => Some(Acquire::BossDrop),
            _ => None,
        }
    }
}

/// Base material of a gear slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    Plate,
    Leather,
    Cloth,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Plate, Material::Leather, Material::Cloth];

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Plate => "Plate",
            Material::Leather => "Leather",
            Material::Cloth => "Cloth",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Plate" => Some(Material::Plate),
            "Leather" => Some(Material::Leather),
            "Cloth" => Some(Material::Cloth),
            _ => None,
        }
    }
}

/// Body part a configuration belongs to. Also the key of the equipped map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Part {
    Armor,
    Helm,
    Gloves,
    Shoes,
}

impl Part {
    pub const ALL: [Part; 4] = [Part::Armor, Part::Helm, Part::Gloves, Part::Shoes];

    pub fn as_str(self) -> &'static str {
        match self {
            Part::Armor => "Armor",
            Part::Helm => "Helm",
            Part::Gloves => "Gloves",
            Part::Shoes => "Shoes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Armor" => Some(Part::Armor),
            "Helm" => Some(Part::Helm),
            "Gloves" => Some(Part::Gloves),
            "Shoes" => Some(Part::Shoes),
            _ => None,
        }
    }
}

/// Category of the single special effect a configuration may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialType {
    #[default]
    None,
    ProcPassive,
    Active,
}

impl SpecialType {
    pub const ALL: [SpecialType; 3] =
        [SpecialType::None, SpecialType::ProcPassive, SpecialType::Active];

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialType::None => "NONE",
            SpecialType::ProcPassive => "PROC_PASSIVE",
            SpecialType::Active => "ACTIVE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NONE" => Some(SpecialType::None),
            "PROC_PASSIVE" => Some(SpecialType::ProcPassive),
            "ACTIVE" => Some(SpecialType::Active),
            _ => None,
        }
    }
}

/// Stat-modifier tags droppable into passive slots. The identifiers are the
/// wire format and the hash input; display labels live entirely in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatMod {
    DefenseVary,
    MaxHpVary,
    DamageDownVaryper,
    AttackVary,
    AtkSpeedVaryper,
    SCNegativeRecoveryVary,
    MaxMpVary,
    SkillCooldownAccVary,
    RegenHpVary,
    CriDamageVaryper,
    CriVaryper,
    RegenMpVary,
    CostMpDownVaryper,
    HealAcceptVary,
    DamageUpVaryper,
    HealAmpVaryper,
    PVEDamageDownVaryper,
    PVPDamageDownVaryper,
    PVEDamageUpVaryper,
    PVPDamageUpVaryper,
    RecoveryRegainVary,
    RecoveryRegainVaryper,
}

impl StatMod {
    pub const ALL: [StatMod; 22] = [
        StatMod::DefenseVary,
        StatMod::MaxHpVary,
        StatMod::DamageDownVaryper,
        StatMod::AttackVary,
        StatMod::AtkSpeedVaryper,
        StatMod::SCNegativeRecoveryVary,
        StatMod::MaxMpVary,
        StatMod::SkillCooldownAccVary,
        StatMod::RegenHpVary,
        StatMod::CriDamageVaryper,
        StatMod::CriVaryper,
        StatMod::RegenMpVary,
        StatMod::CostMpDownVaryper,
        StatMod::HealAcceptVary,
        StatMod::DamageUpVaryper,
        StatMod::HealAmpVaryper,
        StatMod::PVEDamageDownVaryper,
        StatMod::PVPDamageDownVaryper,
        StatMod::PVEDamageUpVaryper,
        StatMod::PVPDamageUpVaryper,
        StatMod::RecoveryRegainVary,
        StatMod::RecoveryRegainVaryper,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatMod::DefenseVary => "DefenseVary",
            StatMod::MaxHpVary => "MaxHpVary",
            StatMod::DamageDownVaryper => "DamageDownVaryper",
            StatMod::AttackVary => "AttackVary",
            StatMod::AtkSpeedVaryper => "AtkSpeedVaryper",
            StatMod::SCNegativeRecoveryVary => "SCNegativeRecoveryVary",
            StatMod::MaxMpVary => "MaxMpVary",
            StatMod::SkillCooldownAccVary => "SkillCooldownAccVary",
            StatMod::RegenHpVary => "RegenHpVary",
            StatMod::CriDamageVaryper => "CriDamageVaryper",
            StatMod::CriVaryper => "CriVaryper",
            StatMod::RegenMpVary => "RegenMpVary",
            StatMod::CostMpDownVaryper => "CostMpDownVaryper",
            StatMod::HealAcceptVary => "HealAcceptVary",
            StatMod::DamageUpVaryper => "DamageUpVaryper",
            StatMod::HealAmpVaryper => "HealAmpVaryper",
            StatMod::PVEDamageDownVaryper => "PVEDamageDownVaryper",
            StatMod::PVPDamageDownVaryper => "PVPDamageDownVaryper",
            StatMod::PVEDamageUpVaryper => "PVEDamageUpVaryper",
            StatMod::PVPDamageUpVaryper => "PVPDamageUpVaryper",
            StatMod::RecoveryRegainVary => "RecoveryRegainVary",
            StatMod::RecoveryRegainVaryper => "RecoveryRegainVaryper",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        StatMod::ALL.iter().copied().find(|tag| tag.as_str() == value)
    }
}

/// The structural half of a configuration's identity: which slot of the
/// design space it occupies. Immutable once a configuration exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub tier: Tier,
    pub acquire: Acquire,
    pub material: Material,
    pub part: Part,
}
