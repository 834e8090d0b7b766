//! Tests for add-ons run after a calculation.

mod common;

use std::collections::BTreeMap;

use common::{fixture, test_config};
use minion_calc::addons::{
    bad_luck_profit, builtin, find, loop_compactor, repay_days, run_addons,
};
use minion_calc::calculator::Calculator;
use minion_calc::catalog::{ItemEntry, Prices, UpgradeEffect, UpgradeStats};
use minion_calc::data::embedded_catalog;
use minion_calc::models::{Configuration, Outcome};
use minion_calc::templates::Template;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_repay_days() {
    let outcome = Outcome {
        total_seconds: 86400.0,
        total_profit: 100.0,
        setup_cost: 1000.0,
        ..Outcome::default()
    };
    assert_eq!(repay_days(&outcome), Some(10.0));

    let broke = Outcome {
        total_profit: 0.0,
        ..outcome
    };
    assert_eq!(repay_days(&broke), None);
}

#[test]
fn test_bad_luck_profit() {
    let mut config = Configuration::default();
    let outcome = Outcome {
        total_profit: 100.0,
        item_profits: BTreeMap::from([
            ("INFERNO_APEX".to_string(), 30.0),
            ("GABAGOOL_THE_FISH".to_string(), 5.0),
            ("CRUDE_GABAGOOL".to_string(), 50.0),
        ]),
        ..Outcome::default()
    };

    assert_eq!(bad_luck_profit(&config, &outcome), Err("No Inferno Minion Fuel Found"));

    config.fuel = "INFERNO_FUEL".to_string();
    config.inferno_grade = "HEAVY_GABAGOOL".to_string();
    assert_eq!(bad_luck_profit(&config, &outcome), Err("No Hypergolic Items Found"));

    config.inferno_grade = "HYPERGOLIC_GABAGOOL".to_string();
    assert_eq!(bad_luck_profit(&config, &outcome), Ok(65.0));
}

#[test]
fn test_lookup_by_name() {
    assert_eq!(builtin().len(), 5);
    assert!(find("days to repay setup").is_some(), "Lookup ignores case");
    assert!(find("Nothing").is_none());
}

#[test]
fn test_repay_output() {
    let calculator = Calculator::new(fixture());
    let config = Configuration {
        afk: true,
        ..test_config()
    };
    let outcome = calculator.calculate(&config).expect("Calculation failed");

    let context = run_addons(&calculator, config, outcome, &names(&["Days to Repay Setup", "Unknown"]))
        .expect("Add-ons failed");
    let outputs = context.outputs();
    assert_eq!(outputs.len(), 1, "Unknown add-ons are skipped");
    assert_eq!(outputs[0].0, "Setup Repay Time");
    assert!(outputs[0].1.ends_with(" Days"), "Got {}", outputs[0].1);
}

#[test]
fn test_repay_division_by_zero() {
    let calculator = Calculator::new(fixture());
    let context = run_addons(
        &calculator,
        test_config(),
        Outcome::default(),
        &names(&["Days to Repay Setup"]),
    )
    .expect("Add-ons failed");

    assert_eq!(context.outputs()[0].1, "Division by zero");
}

#[test]
fn test_basic_loop_lists_every_node() {
    let calculator = Calculator::new(fixture());
    let config = Configuration {
        tier: 2,
        ..test_config()
    };
    let outcome = calculator.calculate(&config).expect("Calculation failed");

    let context = run_addons(&calculator, config, outcome, &names(&["Basic Minion Loop"]))
        .expect("Add-ons failed");
    let (config, _, outputs) = context.into_parts();
    let lines: Vec<&str> = outputs[0].1.lines().collect();
    assert_eq!(lines.len(), 3, "Header plus one line per node");
    assert_eq!(lines[0], "Minion : profit , setup cost");
    assert_eq!(config.tier, 2, "The loop works on a copy");
}

#[test]
fn test_basic_loop_smelting_nodes_use_dwarven_compactor() {
    let mut catalog = fixture();
    assert_eq!(loop_compactor("Iron", &catalog), "SUPER_COMPACTOR_3000");

    catalog.upgrades.push("DWARVEN_SUPER_COMPACTOR".to_string());
    catalog.items.insert(
        "DWARVEN_SUPER_COMPACTOR".to_string(),
        ItemEntry {
            display: "Dwarven Super Compactor".to_string(),
            prices: Prices {
                buy_price: Some(5e9),
                sell_price: Some(5e9),
                ..Prices::default()
            },
            upgrade: Some(UpgradeStats {
                effects: vec![UpgradeEffect::SuperCompact],
                ..UpgradeStats::default()
            }),
            ..ItemEntry::default()
        },
    );
    let iron = catalog.nodes["Test"].clone();
    catalog.nodes.insert("Iron".to_string(), iron);
    assert_eq!(loop_compactor("Iron", &catalog), "DWARVEN_SUPER_COMPACTOR");
    assert_eq!(loop_compactor("Test", &catalog), "SUPER_COMPACTOR_3000");

    let calculator = Calculator::new(catalog);
    let config = Configuration {
        upgrade2: "SUPER_COMPACTOR_3000".to_string(),
        ..test_config()
    };
    let outcome = calculator.calculate(&config).expect("Calculation failed");
    let context = run_addons(&calculator, config, outcome, &names(&["Basic Minion Loop"]))
        .expect("Add-ons failed");
    let output = &context.outputs()[0].1;

    let line = |node: &str| {
        output
            .lines()
            .find(|line| line.starts_with(&format!("{node} :")))
            .unwrap_or_else(|| panic!("{node} missing from {output}"))
            .to_string()
    };
    // the setup cost shows which compactor was priced in
    assert!(line("Iron").ends_with(", 5B"), "Got {}", line("Iron"));
    assert!(line("Test").ends_with(", 1.02k"), "Got {}", line("Test"));
}

#[test]
fn test_rising_celsius_replaces_outcome() {
    let calculator = Calculator::new(embedded_catalog().expect("Failed to load embedded catalog"));
    let config = Configuration {
        node: "Inferno".to_string(),
        tier: 11,
        ..Configuration::default()
    };
    let outcome = calculator.calculate(&config).expect("Calculation failed");
    let before = outcome.action_time;

    let context = run_addons(&calculator, config, outcome, &names(&["Rising Celsius Override"]))
        .expect("Add-ons failed");
    assert!(context.outcome.action_time < before, "Max Rising Celsius is faster");
    assert_eq!(context.outputs()[0].1, "Forced Rising Celsius boost to max");
}

#[test]
fn test_bad_luck_inferno_output() {
    let calculator = Calculator::new(embedded_catalog().expect("Failed to load embedded catalog"));
    let mut config = Configuration {
        tier: 11,
        ..Configuration::default()
    };
    Template::MaxedInferno.apply(&mut config);
    let outcome = calculator.calculate(&config).expect("Calculation failed");

    let context = run_addons(&calculator, config, outcome, &names(&["Bad Luck Inferno"]))
        .expect("Add-ons failed");
    let (name, text) = &context.outputs()[0];
    assert_eq!(name, "Bad Luck Inferno Profit");
    assert!(text.ends_with(" per Inferno Vertex"), "Got {}", text);
}

#[test]
fn test_inferno_loop() {
    let calculator = Calculator::new(embedded_catalog().expect("Failed to load embedded catalog"));
    let mut config = Configuration {
        tier: 11,
        ..Configuration::default()
    };
    Template::MaxedInferno.apply(&mut config);
    let outcome = calculator.calculate(&config).expect("Calculation failed");

    let context = run_addons(&calculator, config, outcome, &names(&["Inferno Minion Loop"]))
        .expect("Add-ons failed");
    let lines: Vec<&str> = context.outputs()[0].1.lines().collect();
    assert!(lines.len() >= 2);
    assert!(lines.len() <= 12, "At most ten results");
    assert!(lines[lines.len() - 1].starts_with("Bad Luck Profit: +"));
}
