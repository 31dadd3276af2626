//! Equip projection: dangling references resolve to empty, and effect
//! aggregation counts labels deterministically.

use gearsmith::data::{
    aggregate_effects, resolve_equipped, Acquire, ArmorConfig, Material, Part, Session,
    SpecialType, StatMod, Tier,
};

fn draft(part: Part) -> ArmorConfig {
    ArmorConfig {
        id: String::new(),
        tier: Tier::T2,
        acquire: Acquire::LootCraft,
        material: Material::Leather,
        part,
        passive1: vec![StatMod::AttackVary],
        passive2: Vec::new(),
        special_type: SpecialType::None,
        special_effect: String::new(),
    }
}

#[test]
fn dangling_equip_references_resolve_to_empty_slots() {
    let mut session = Session::default();
    session
        .equipped
        .set(Part::Helm, Some("T1|BASIC_CRAFT|Plate|Helm|h00000000".to_string()));

    let resolved = resolve_equipped(&session.equipped, &session.store);
    assert_eq!(resolved.len(), 4);
    assert!(resolved.iter().all(|(_, cfg)| cfg.is_none()));

    let effects = aggregate_effects(&resolved);
    assert!(effects.stat_mods.is_empty());
    assert!(effects.proc_effects.is_empty());
    assert!(effects.active_effects.is_empty());
}

#[test]
fn shared_tags_across_parts_accumulate_counts() {
    let mut session = Session::default();
    let helm = session.store.save(&draft(Part::Helm)).unwrap();
    let mut shoes_draft = draft(Part::Shoes);
    shoes_draft.passive2 = vec![StatMod::AttackVary, StatMod::MaxHpVary];
    shoes_draft.passive1 = vec![StatMod::DefenseVary];
    let shoes = session.store.save(&shoes_draft).unwrap();

    session.equip(&helm.id).unwrap();
    session.equip(&shoes.id).unwrap();

    let resolved = resolve_equipped(&session.equipped, &session.store);
    let effects = aggregate_effects(&resolved);

    let attack = effects
        .stat_mods
        .iter()
        .find(|entry| entry.label == "AttackVary")
        .unwrap();
    assert_eq!(attack.count, 2, "slot1 on helm + slot2 on shoes accumulate");

    // count-descending order puts the shared tag first; ties sort by label
    assert_eq!(effects.stat_mods[0].label, "AttackVary");
    assert_eq!(effects.stat_mods[1].label, "DefenseVary");
    assert_eq!(effects.stat_mods[2].label, "MaxHpVary");
    assert!(effects.stat_mods[1..].iter().all(|entry| entry.count == 1));
}

#[test]
fn identical_special_text_on_two_parts_counts_as_one_label() {
    let mut session = Session::default();
    let text = "Recover health when struck (Proc Passive)";

    let mut helm_draft = draft(Part::Helm);
    helm_draft.special_type = SpecialType::ProcPassive;
    helm_draft.special_effect = text.to_string();
    let mut gloves_draft = draft(Part::Gloves);
    gloves_draft.special_type = SpecialType::ProcPassive;
    gloves_draft.special_effect = format!("  {text} ");

    let helm = session.store.save(&helm_draft).unwrap();
    let gloves = session.store.save(&gloves_draft).unwrap();
    session.equip(&helm.id).unwrap();
    session.equip(&gloves.id).unwrap();

    let effects = aggregate_effects(&resolve_equipped(&session.equipped, &session.store));
    assert_eq!(effects.proc_effects.len(), 1, "trimmed text is the key");
    assert_eq!(effects.proc_effects[0].label, text);
    assert_eq!(effects.proc_effects[0].count, 2);
    assert!(effects.active_effects.is_empty());
}

#[test]
fn proc_and_active_effects_route_to_separate_buckets() {
    let mut session = Session::default();

    let mut proc_draft = draft(Part::Armor);
    proc_draft.special_type = SpecialType::ProcPassive;
    proc_draft.special_effect = "Gain defense when struck (Proc Passive)".to_string();
    let mut active_draft = draft(Part::Shoes);
    active_draft.special_type = SpecialType::Active;
    active_draft.special_effect = "Instantly gain a shield (Active)".to_string();

    let proc = session.store.save(&proc_draft).unwrap();
    let active = session.store.save(&active_draft).unwrap();
    session.equip(&proc.id).unwrap();
    session.equip(&active.id).unwrap();

    let effects = aggregate_effects(&resolve_equipped(&session.equipped, &session.store));
    assert_eq!(effects.proc_effects.len(), 1);
    assert_eq!(effects.active_effects.len(), 1);
    assert_eq!(effects.active_effects[0].label, "Instantly gain a shield (Active)");
}

#[test]
fn equipping_a_second_version_replaces_the_part_slot() {
    let mut session = Session::default();
    let first = session.store.save(&draft(Part::Helm)).unwrap();
    let mut other_draft = draft(Part::Helm);
    other_draft.passive1 = vec![StatMod::CriVaryper];
    let second = session.store.save(&other_draft).unwrap();

    session.equip(&first.id).unwrap();
    session.equip(&second.id).unwrap();
    assert_eq!(session.equipped.get(Part::Helm), Some(second.id.as_str()));

    assert!(session.unequip(Part::Helm));
    assert!(!session.unequip(Part::Helm));
}

#[test]
fn equipping_an_unknown_id_is_an_error() {
    let mut session = Session::default();
    assert!(session.equip("T1|BASIC_CRAFT|Plate|Helm|h12345678").is_err());
}
