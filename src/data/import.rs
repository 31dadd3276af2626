//! Import/export of configuration collections. An import document is either
//! a bare JSON array of configuration-shaped objects or an object with a
//! `configs` array (and optionally an `equipped` map). Individual entries
//! that fail sanitization are dropped before reconciliation begins, so the
//! batch applies atomically or not at all.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::data::config::ArmorConfig;
use crate::data::equip::EquippedMap;
use crate::data::key::Part;
use crate::data::sanitize::{sanitize_config, sanitize_equipped};
use crate::data::session::Session;

pub const EXPORT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Merge,
    Replace,
}

impl ImportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportMode::Merge => "merge",
            ImportMode::Replace => "replace",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "merge" => Some(ImportMode::Merge),
            "replace" => Some(ImportMode::Replace),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    MissingConfigs,
    NoValidItems,
    Write(std::io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read import file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse import JSON: {err}"),
            Self::MissingConfigs => {
                write!(f, "expected a top-level JSON array or an object with a 'configs' array")
            }
            Self::NoValidItems => write!(f, "no valid configurations in the import data"),
            Self::Write(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// A sanitized import batch, ready for reconciliation.
#[derive(Debug, Clone)]
pub struct ImportDocument {
    pub configs: Vec<ArmorConfig>,
    pub equipped: Option<EquippedMap>,
    /// Raw entry count before sanitization, for the report.
    pub total_records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub mode: &'static str,
    pub total_records: usize,
    pub accepted: usize,
    pub dropped: usize,
}

/// Parse and sanitize an import payload. Top-level shape problems are
/// errors surfaced before any store mutation; individual bad entries are
/// silently dropped. A batch with zero surviving entries is rejected.
pub fn parse_import_document(raw: &str) -> Result<ImportDocument, ImportError> {
    let payload: Value = serde_json::from_str(raw).map_err(ImportError::Parse)?;

    let entries = payload
        .as_array()
        .or_else(|| payload.get("configs").and_then(Value::as_array))
        .ok_or(ImportError::MissingConfigs)?;

    let configs: Vec<ArmorConfig> = entries.iter().filter_map(sanitize_config).collect();
    if configs.is_empty() {
        return Err(ImportError::NoValidItems);
    }

    let equipped = payload.get("equipped").map(sanitize_equipped);

    Ok(ImportDocument {
        total_records: entries.len(),
        configs,
        equipped,
    })
}

/// Apply a sanitized batch to the session.
///
/// Replace makes the store exactly the incoming items; equipped entries
/// survive only when their id is among the incoming ids. Merge upserts each
/// incoming item by id (last writer wins, no field-level merging) and leaves
/// everything else untouched. When the document carries its own equipped
/// map, its entries are adopted under the same survival rule, and only when
/// the referenced config's part matches the slot.
pub fn reconcile(session: &mut Session, document: ImportDocument, mode: ImportMode) -> ImportReport {
    let report = ImportReport {
        mode: mode.as_str(),
        total_records: document.total_records,
        accepted: document.configs.len(),
        dropped: document.total_records - document.configs.len(),
    };

    match mode {
        ImportMode::Replace => {
            let incoming_ids: HashSet<String> =
                document.configs.iter().map(|cfg| cfg.id.clone()).collect();
            session.store.replace_all(document.configs);

            if let Some(incoming_equipped) = document.equipped {
                session.equipped = incoming_equipped;
            }
            session.equipped.retain_ids(|id| incoming_ids.contains(id));
        }
        ImportMode::Merge => {
            let incoming_equipped = document.equipped;
            for cfg in document.configs {
                session.store.insert_imported(cfg);
            }
            if let Some(incoming_equipped) = incoming_equipped {
                for part in Part::ALL {
                    let Some(id) = incoming_equipped.get(part) else { continue };
                    if session.store.contains(id) {
                        session.equipped.set(part, Some(id.to_string()));
                    }
                }
            }
        }
    }

    // either way, never keep a slot pointing at a config of another part
    for part in Part::ALL {
        let mismatched = session
            .equipped
            .get(part)
            .and_then(|id| session.store.get(id))
            .is_some_and(|cfg| cfg.part != part);
        if mismatched {
            session.equipped.set(part, None);
        }
    }

    report
}

/// Downloadable export artifact: `{exportedAt, version, configs, equipped}`.
pub fn export_document(session: &Session) -> Value {
    serde_json::json!({
        "exportedAt": Utc::now().to_rfc3339(),
        "version": EXPORT_FORMAT_VERSION,
        "configs": session.store.list_saved(),
        "equipped": session.equipped,
    })
}

/// CLI entry: import a file into the session.
pub fn import_file(
    session: &mut Session,
    path: impl AsRef<Path>,
    mode: ImportMode,
) -> Result<ImportReport, ImportError> {
    let raw = fs::read_to_string(path).map_err(ImportError::Read)?;
    let document = parse_import_document(&raw)?;
    Ok(reconcile(session, document, mode))
}

/// CLI entry: write the export document to a file. Returns the number of
/// exported configurations.
pub fn export_file(session: &Session, path: impl AsRef<Path>) -> Result<usize, ImportError> {
    let path = path.as_ref();
    let count = session.store.len();
    let document = export_document(session);
    let serialized = serde_json::to_string_pretty(&document).map_err(ImportError::Parse)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ImportError::Write)?;
        }
    }
    fs::write(path, serialized).map_err(ImportError::Write)?;
    Ok(count)
}
