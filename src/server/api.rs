use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::data::catalog::{routes_for_tier, SPECIAL_EFFECT_POOL};
use crate::data::config::ArmorConfig;
use crate::data::equip::{aggregate_effects, resolve_equipped};
use crate::data::ident::version_label;
use crate::data::import::{
    export_document, parse_import_document, reconcile, ImportError, ImportMode,
};
use crate::data::key::{Acquire, Material, Part, SpecialType, StatMod, Tier};
use crate::data::session::{EquipError, Session};
use crate::data::store::SaveError;

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "gearsmith-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Closed tag sets, the tier/route availability matrix and the authoring
/// pool, in one payload the editor loads once.
pub fn catalog_payload() -> Result<String, serde_json::Error> {
    let mut availability = serde_json::Map::new();
    for tier in Tier::ALL {
        availability.insert(tier.as_u8().to_string(), json!(routes_for_tier(tier)));
    }
    serde_json::to_string_pretty(&json!({
        "tiers": Tier::ALL,
        "acquireRoutes": Acquire::ALL,
        "materials": Material::ALL,
        "parts": Part::ALL,
        "statMods": StatMod::ALL,
        "specialTypes": SpecialType::ALL,
        "availability": availability,
        "specialEffectPool": SPECIAL_EFFECT_POOL,
    }))
}

#[derive(Debug, Clone, Serialize)]
struct SavedConfigItem<'a> {
    #[serde(flatten)]
    config: &'a ArmorConfig,
    version: &'a str,
}

pub fn configs_payload(session: &Session) -> Result<String, serde_json::Error> {
    let items: Vec<SavedConfigItem<'_>> = session
        .store
        .list_saved()
        .into_iter()
        .map(|config| SavedConfigItem {
            config,
            version: version_label(&config.id).unwrap_or(""),
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "count": items.len(), "configs": items }))
}

#[derive(Debug)]
pub enum SavePayloadError {
    Parse(serde_json::Error),
    Invalid(SaveError),
}

impl fmt::Display for SavePayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid draft body: {err}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SavePayloadError {}

/// Save a draft. Any id in the body is ignored; identity is always
/// recomputed from the payload.
pub fn save_payload(session: &mut Session, body: &str) -> Result<String, SavePayloadError> {
    let draft: ArmorConfig = serde_json::from_str(body).map_err(SavePayloadError::Parse)?;
    let outcome = session.store.save(&draft).map_err(SavePayloadError::Invalid)?;
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "id": outcome.id,
        "wasUpdate": outcome.was_update,
        "version": version_label(&outcome.id).unwrap_or(""),
    }))
    .map_err(SavePayloadError::Parse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePayloadError {
    NotFound,
}

impl fmt::Display for DeletePayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no saved configuration with that id"),
        }
    }
}

impl std::error::Error for DeletePayloadError {}

pub fn delete_payload(session: &mut Session, id: &str) -> Result<String, DeletePayloadError> {
    if !session.delete(id) {
        return Err(DeletePayloadError::NotFound);
    }
    Ok(ok_status_body())
}

pub fn reset_payload(session: &mut Session) -> String {
    session.reset_all();
    ok_status_body()
}

/// Per-part resolved configurations plus the aggregated effect lists.
/// Dangling equip references resolve to null slots.
pub fn equipped_payload(session: &Session) -> Result<String, serde_json::Error> {
    let resolved = resolve_equipped(&session.equipped, &session.store);
    let effects = aggregate_effects(&resolved);

    let mut slots = serde_json::Map::new();
    for (part, config) in &resolved {
        slots.insert(part.as_str().to_string(), serde_json::to_value(config)?);
    }

    serde_json::to_string_pretty(&json!({ "slots": slots, "effects": effects }))
}

#[derive(Debug)]
pub enum EquipPayloadError {
    Parse(serde_json::Error),
    UnknownId,
    UnknownPart,
}

impl fmt::Display for EquipPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid equip body: {err}"),
            Self::UnknownId => write!(f, "{}", EquipError::UnknownId),
            Self::UnknownPart => write!(f, "unknown body part"),
        }
    }
}

impl std::error::Error for EquipPayloadError {}

#[derive(Debug, Deserialize)]
struct EquipRequest {
    id: String,
}

/// Equip a saved configuration; the target slot is the config's own part.
pub fn equip_payload(session: &mut Session, body: &str) -> Result<String, EquipPayloadError> {
    let request: EquipRequest = serde_json::from_str(body).map_err(EquipPayloadError::Parse)?;
    let part = session
        .equip(&request.id)
        .map_err(|_| EquipPayloadError::UnknownId)?;
    serde_json::to_string_pretty(&json!({ "status": "ok", "part": part }))
        .map_err(EquipPayloadError::Parse)
}

pub fn unequip_payload(session: &mut Session, part: &str) -> Result<String, EquipPayloadError> {
    let part = Part::parse(part).ok_or(EquipPayloadError::UnknownPart)?;
    let removed = session.unequip(part);
    serde_json::to_string_pretty(&json!({ "status": "ok", "removed": removed }))
        .map_err(EquipPayloadError::Parse)
}

pub fn clear_equipped_payload(session: &mut Session) -> String {
    session.clear_equipped();
    ok_status_body()
}

pub fn import_payload(
    session: &mut Session,
    body: &str,
    mode: ImportMode,
) -> Result<String, ImportError> {
    let document = parse_import_document(body)?;
    let report = reconcile(session, document, mode);
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "mode": report.mode,
        "totalRecords": report.total_records,
        "accepted": report.accepted,
        "dropped": report.dropped,
    }))
    .map_err(ImportError::Parse)
}

pub fn export_payload(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&export_document(session))
}

fn ok_status_body() -> String {
    "{\n  \"status\": \"ok\"\n}".to_string()
}
