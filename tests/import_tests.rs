//! Import pipeline: document shapes, sanitization at the batch boundary,
//! and merge/replace reconciliation including equipped-map survival.

use gearsmith::data::{
    parse_import_document, reconcile, Acquire, ArmorConfig, ImportError, ImportMode, Material,
    Part, Session, SpecialType, StatMod, Tier,
};
use serde_json::json;

fn draft(part: Part, tag: StatMod) -> ArmorConfig {
    ArmorConfig {
        id: String::new(),
        tier: Tier::T2,
        acquire: Acquire::BossDrop,
        material: Material::Plate,
        part,
        passive1: vec![tag],
        passive2: Vec::new(),
        special_type: SpecialType::None,
        special_effect: String::new(),
    }
}

fn config_json(cfg: &ArmorConfig) -> serde_json::Value {
    serde_json::to_value(cfg).unwrap()
}

#[test]
fn accepts_bare_array_and_configs_object_shapes() {
    let entry = json!({
        "tier": 1, "acquire": "BASIC_CRAFT", "material": "Plate", "part": "Armor",
        "passive1": ["DefenseVary"],
    });

    let bare = parse_import_document(&json!([entry]).to_string()).unwrap();
    assert_eq!(bare.configs.len(), 1);

    let wrapped = parse_import_document(&json!({ "configs": [entry] }).to_string()).unwrap();
    assert_eq!(wrapped.configs.len(), 1);
}

#[test]
fn rejects_malformed_top_level_shapes() {
    assert!(matches!(
        parse_import_document("not json at all"),
        Err(ImportError::Parse(_))
    ));
    assert!(matches!(
        parse_import_document("{\"items\": []}"),
        Err(ImportError::MissingConfigs)
    ));
    assert!(matches!(
        parse_import_document("42"),
        Err(ImportError::MissingConfigs)
    ));
}

#[test]
fn unsanitizable_entries_are_dropped_not_fatal() {
    let good = json!({
        "tier": 2, "acquire": "LOOT_CRAFT", "material": "Cloth", "part": "Helm",
        "passive1": ["AttackVary"],
    });
    let payload = json!([null, 42, {}, { "tier": 99 }, good]).to_string();

    let document = parse_import_document(&payload).unwrap();
    assert_eq!(document.total_records, 5);
    assert_eq!(document.configs.len(), 1);

    let mut session = Session::default();
    let report = reconcile(&mut session, document, ImportMode::Merge);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.dropped, 4);
    assert_eq!(session.store.len(), 1);
}

#[test]
fn all_invalid_batches_are_rejected_before_any_mutation() {
    assert!(matches!(
        parse_import_document("[null, 42, {}]"),
        Err(ImportError::NoValidItems)
    ));
}

#[test]
fn merge_upserts_and_replace_substitutes() {
    // existing store: {A, B}
    let mut session = Session::default();
    let a = session.store.save(&draft(Part::Armor, StatMod::DefenseVary)).unwrap();
    let b = session.store.save(&draft(Part::Helm, StatMod::MaxHpVary)).unwrap();

    // incoming: {B' (same id, different payload), C}
    let mut b_prime = session.store.get(&b.id).unwrap().clone();
    b_prime.passive2 = vec![StatMod::RegenHpVary];
    let c = draft(Part::Shoes, StatMod::AttackVary);
    let incoming = json!([config_json(&b_prime), config_json(&c)]).to_string();

    // merge keeps A, overwrites B with B', adds C
    let mut merged = session.clone();
    let document = parse_import_document(&incoming).unwrap();
    reconcile(&mut merged, document, ImportMode::Merge);
    assert_eq!(merged.store.len(), 3);
    assert!(merged.store.get(&a.id).is_some());
    assert_eq!(
        merged.store.get(&b.id).unwrap().passive2,
        vec![StatMod::RegenHpVary],
        "same-id incoming overwrites, last writer wins"
    );

    // replace yields exactly {B', C}
    let mut replaced = session.clone();
    let document = parse_import_document(&incoming).unwrap();
    reconcile(&mut replaced, document, ImportMode::Replace);
    assert_eq!(replaced.store.len(), 2);
    assert!(replaced.store.get(&a.id).is_none());
    assert!(replaced.store.get(&b.id).is_some());
}

#[test]
fn replace_keeps_equipped_entries_whose_ids_survive() {
    let mut session = Session::default();
    let a = session.store.save(&draft(Part::Armor, StatMod::DefenseVary)).unwrap();
    let b = session.store.save(&draft(Part::Helm, StatMod::MaxHpVary)).unwrap();
    session.equip(&a.id).unwrap();
    session.equip(&b.id).unwrap();

    // incoming contains only B
    let b_cfg = session.store.get(&b.id).unwrap().clone();
    let incoming = json!([config_json(&b_cfg)]).to_string();
    let document = parse_import_document(&incoming).unwrap();
    reconcile(&mut session, document, ImportMode::Replace);

    assert_eq!(session.equipped.get(Part::Armor), None, "A's id is gone");
    assert_eq!(session.equipped.get(Part::Helm), Some(b.id.as_str()));
}

#[test]
fn document_equipped_map_is_adopted_with_survival_rules() {
    let mut session = Session::default();
    let existing = session.store.save(&draft(Part::Armor, StatMod::DefenseVary)).unwrap();

    let helm = draft(Part::Helm, StatMod::CriVaryper);
    let helm_id = {
        let mut probe = Session::default();
        probe.store.save(&helm).unwrap().id
    };
    let incoming = json!({
        "configs": [config_json(&helm)],
        "equipped": {
            "Helm": helm_id,
            "Armor": existing.id,
            "Gloves": "T1|BASIC_CRAFT|Plate|Gloves|hFFFFFFFF",
        }
    })
    .to_string();

    let document = parse_import_document(&incoming).unwrap();
    reconcile(&mut session, document, ImportMode::Merge);

    assert_eq!(session.equipped.get(Part::Helm), Some(helm_id.as_str()));
    assert_eq!(
        session.equipped.get(Part::Armor),
        Some(existing.id.as_str()),
        "merge accepts file entries referencing pre-existing ids"
    );
    assert_eq!(session.equipped.get(Part::Gloves), None, "unknown id is not adopted");
}

#[test]
fn imported_ids_are_kept_when_well_shaped_and_rebuilt_otherwise() {
    let foreign_id = "T2|BOSS_DROP|Plate|Helm|hCAFEBABE";
    let payload = json!([
        {
            "id": foreign_id,
            "tier": 2, "acquire": "BOSS_DROP", "material": "Plate", "part": "Helm",
            "passive1": ["AttackVary"],
        },
        {
            "id": "garbage",
            "tier": 2, "acquire": "BOSS_DROP", "material": "Plate", "part": "Shoes",
            "passive1": ["AttackVary"],
        },
    ])
    .to_string();

    let document = parse_import_document(&payload).unwrap();
    assert_eq!(document.configs[0].id, foreign_id);
    assert!(document.configs[1].id.starts_with("T2|BOSS_DROP|Plate|Shoes|h"));
}

#[test]
fn import_report_counts_are_visible_to_the_caller() {
    let good = json!({
        "tier": 3, "acquire": "DUNGEON_CORE", "material": "Leather", "part": "Gloves",
        "passive1": ["HealAmpVaryper"],
    });
    let payload = json!([good, {"tier": 0}]).to_string();

    let mut session = Session::default();
    let document = parse_import_document(&payload).unwrap();
    let report = reconcile(&mut session, document, ImportMode::Replace);

    assert_eq!(report.mode, "replace");
    assert_eq!(report.total_records, 2);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.dropped, 1);
}
