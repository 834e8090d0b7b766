//! Tests for catalog loading.

use minion_calc::data::{assemble, embedded_catalog, load_catalog, load_items, parse_items};
use minion_calc::error::CatalogError;
use minion_calc::models::Skill;
use std::path::Path;

#[test]
fn test_load_data_dir() {
    let data_dir = Path::new("data");
    if !data_dir.exists() {
        // Skip test if data directory doesn't exist (e.g., in CI)
        return;
    }

    let catalog = load_catalog(data_dir).expect("Failed to load data");
    assert!(!catalog.nodes.is_empty(), "Should load at least some nodes");
    assert_eq!(
        catalog,
        embedded_catalog().expect("Failed to load embedded catalog"),
        "The embedded copy should match the data directory"
    );
}

#[test]
fn test_embedded_catalog_is_consistent() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");

    for (name, node) in &catalog.nodes {
        assert!(!node.drops.is_empty(), "{} has no drops", name);
        for tier in node.speed.keys() {
            assert!(node.costs.contains_key(tier), "{} tier {} has no cost", name, tier);
            assert!(node.speed[tier] > 0.0, "{} tier {} has no speed", name, tier);
        }
    }
    for id in catalog.fuels.iter().chain(&catalog.upgrades) {
        let (_, found) = catalog.upgrade_stats(id);
        assert!(found, "{} should have upgrade stats", id);
    }
    assert_eq!(catalog.fuels.first().map(String::as_str), Some("NONE"));
    assert_eq!(catalog.upgrades.first().map(String::as_str), Some("NONE"));
    assert!(catalog.chests.contains_key("NONE"));
    assert!(catalog.hoppers.contains_key("NONE"));
}

#[test]
fn test_parse_items() {
    let csv = "\
id, display, npc, buy_price, sell_price, custom, xp_skill, xp_amount, duration
COBBLESTONE, Cobblestone, 1, 2.6, 2.1, , mining, 0.1,
POWER_CRYSTAL, Power Crystal, , 100, 90, , , , 172800
";
    let items = parse_items(csv.as_bytes()).expect("Failed to parse items");
    assert_eq!(items.len(), 2);

    let cobblestone = &items["COBBLESTONE"];
    assert_eq!(cobblestone.display, "Cobblestone");
    assert_eq!(cobblestone.prices.npc, Some(1.0));
    assert_eq!(cobblestone.prices.custom, None);
    assert_eq!(cobblestone.xp.map(|xp| xp.skill), Some(Skill::Mining));

    let crystal = &items["POWER_CRYSTAL"];
    assert_eq!(crystal.prices.npc, None);
    assert_eq!(crystal.duration, Some(172_800.0));
    assert!(crystal.xp.is_none());
}

#[test]
fn test_upgrade_stats_attach_to_items() {
    let header = "id,display,npc,buy_price,sell_price,custom,xp_skill,xp_amount,duration\n";
    let items = parse_items(header.as_bytes()).expect("Failed to parse items");
    let tables = r#"{
        "nodes": { "Test": { "drops": { "A": 1 }, "speed": { "1": 10 } } },
        "upgrade_stats": { "LAVA": { "speed": 25 } }
    }"#;

    let catalog = assemble(items, tables).expect("Failed to assemble");
    let lava = catalog.item("LAVA").expect("Stats should create the item");
    assert_eq!(lava.display, "LAVA");
    assert_eq!(catalog.upgrade_stats("LAVA").0.speed, 25.0);
}

#[test]
fn test_catalog_without_nodes() {
    let result = assemble(Default::default(), r#"{ "nodes": {} }"#);
    assert!(matches!(result, Err(CatalogError::Empty)));

    let result = assemble(Default::default(), "not json");
    assert!(matches!(result, Err(CatalogError::Json(_))));
}

#[test]
fn test_missing_file() {
    let result = load_items(Path::new("does/not/exist.csv"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}
