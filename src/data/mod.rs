pub mod catalog;
pub mod config;
pub mod equip;
pub mod ident;
pub mod import;
pub mod key;
pub mod sanitize;
pub mod session;
pub mod store;

pub use config::{clamp_slot, is_valid_config, ArmorConfig, SLOT_CAP};
pub use equip::{
    aggregate_effects, resolve_equipped, AggregatedEffects, EffectCount, EquippedMap,
};
pub use ident::{
    base_id, compose_id, content_hash, decompose_id, signature, unique_id, version_label,
    ID_HASH_TAG,
};
pub use import::{
    export_document, export_file, import_file, parse_import_document, reconcile, ImportDocument,
    ImportError, ImportMode, ImportReport, EXPORT_FORMAT_VERSION,
};
pub use key::{Acquire, Material, Part, SlotKey, SpecialType, StatMod, Tier};
pub use sanitize::{sanitize_config, sanitize_equipped};
pub use session::{load_session, save_session, EquipError, Session, DEFAULT_SESSION_PATH};
pub use store::{ConfigStore, SaveError, SaveOutcome};
