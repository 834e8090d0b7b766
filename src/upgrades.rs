//! Upgrade effects on the working ledger.
//!
//! Effects run in upgrade order against the base drops. Generated, added and
//! timed items are kept in side ledgers while processing because generating
//! effects read the main ledger, and are merged into it at the end.

use crate::catalog::{Catalog, UpgradeEffect, UpgradeStats};
use crate::economy::PriceBook;
use crate::models::{Configuration, Notes};
use crate::rates::INFERNO_FUEL;
use crate::yields::{Ledger, Production};

pub const CORRUPT_SOIL: &str = "CORRUPT_SOIL";
pub const ENCHANTED_EGG: &str = "ENCHANTED_EGG";
pub const ENCHANTED_SHEARS: &str = "ENCHANTED_SHEARS";
pub const SOULFLOW_ENGINE: &str = "SOULFLOW_ENGINE";
pub const LESSER_SOULFLOW_ENGINE: &str = "LESSER_SOULFLOW_ENGINE";

/// Grade that unlocks the hypergolic drops.
pub const HYPERGOLIC_GRADE: &str = "HYPERGOLIC_GABAGOOL";
const EYEDROPS: &str = "CAPSAICIN_EYEDROPS_NO_CHARGES";
const FUEL_BLOCK: &str = "INFERNO_FUEL_BLOCK";
const IONIZED_CERAMICS: &str = "HYPERGOLIC_IONIZED_CERAMICS";
const INFERNO_APEX: &str = "INFERNO_APEX";

/// What the effect stage hands to later stages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectSummary {
    /// A compactor is installed.
    pub compact: bool,
    /// A super compactor is installed.
    pub super_compact: bool,
    /// Composed price of one Inferno fuel, when that fuel is used.
    pub inferno_fuel_price: Option<f64>,
}

/// Side ledgers filled while processing effects.
#[derive(Debug, Default)]
struct SideLedgers {
    upgrade: Ledger,
    spreading: Ledger,
    cooldown: Ledger,
}

fn add(ledger: &mut Ledger, item: &str, amount: f64) {
    *ledger.entry(item.to_string()).or_insert(0.0) += amount;
}

fn scale(ledger: &mut Ledger, item: &str, factor: f64) {
    if let Some(amount) = ledger.get_mut(item) {
        *amount *= factor;
    }
}

/// Applies every upgrade effect to the production ledger.
pub fn apply(
    config: &Configuration,
    catalog: &Catalog,
    prices: &PriceBook<'_>,
    production: &mut Production,
    notes: &mut Notes,
) -> EffectSummary {
    let attended = config.attended();
    let upgrades: Vec<(String, UpgradeStats)> = production
        .upgrades
        .iter()
        .map(|id| (id.clone(), catalog.upgrade_stats(id).0))
        .collect();
    let has = |wanted: &str| upgrades.iter().any(|(id, _)| id == wanted);
    let harvests = production.harvests;
    let drop = production.drop_multiplier;
    let window = production.window_seconds;

    let mut summary = EffectSummary::default();
    let mut side = SideLedgers::default();

    for (id, stats) in &upgrades {
        for effect in &stats.effects {
            match effect {
                UpgradeEffect::Replace { map } => {
                    let keys: Vec<String> = production.ledger.keys().cloned().collect();
                    for key in keys {
                        if let Some(target) = map.get(&key) {
                            if let Some(amount) = production.ledger.remove(&key) {
                                add(&mut production.ledger, target, amount);
                            }
                        }
                    }
                }
                UpgradeEffect::Generate { chance, items } => {
                    let mut generated: f64 = production.ledger.values().map(|a| chance * a).sum();
                    if config.fuel == INFERNO_FUEL && attended {
                        generated /= 5.0;
                    }
                    for (item, amount) in items {
                        add(&mut side.spreading, item, generated * amount);
                    }
                }
                UpgradeEffect::Add { items } => {
                    for (item, amount) in items {
                        add(&mut side.upgrade, item, harvests * amount);
                    }
                }
                UpgradeEffect::Timer { cooldown, items } => {
                    if attended && id == LESSER_SOULFLOW_ENGINE && has(SOULFLOW_ENGINE) {
                        // the full engine takes over while attended
                        continue;
                    }
                    if *cooldown <= 0.0 {
                        notes.warn(format!("{id} has no cooldown"));
                        continue;
                    }
                    for (item, amount) in items {
                        add(&mut side.cooldown, item, amount * window / cooldown);
                    }
                }
                UpgradeEffect::Compact => summary.compact = true,
                UpgradeEffect::SuperCompact => summary.super_compact = true,
            }
        }
    }

    special_cases(config, catalog, &has, drop, &mut side);

    // generating effects also trigger on items from other upgrades
    for (_, stats) in &upgrades {
        for effect in &stats.effects {
            let UpgradeEffect::Generate { chance, items } = effect else {
                continue;
            };
            if attended {
                if has(ENCHANTED_EGG) {
                    for (item, amount) in items {
                        add(&mut side.spreading, item, harvests * drop * chance * amount);
                    }
                }
            } else {
                let generated: f64 = side.upgrade.values().map(|a| chance * a).sum();
                for (item, amount) in items {
                    add(&mut side.spreading, item, generated * amount);
                }
            }
        }
    }

    if config.fuel == INFERNO_FUEL {
        summary.inferno_fuel_price = Some(inferno_fuel(
            config,
            catalog,
            prices,
            production,
            &mut side.upgrade,
            notes,
        ));
    }

    let mut merged = side.upgrade;
    merged.extend(side.spreading);
    merged.extend(side.cooldown);
    for (item, amount) in merged {
        add(&mut production.ledger, &item, amount);
    }

    tracing::debug!(items = production.ledger.len(), "upgrade effects applied");
    summary
}

fn special_cases(
    config: &Configuration,
    catalog: &Catalog,
    has: &impl Fn(&str) -> bool,
    drop: f64,
    side: &mut SideLedgers,
) {
    let node = config.node.as_str();
    if config.attended() {
        if has(CORRUPT_SOIL) {
            if let Some(factor) = catalog.node(node).and_then(|n| n.afk_corrupt) {
                scale(&mut side.upgrade, "SULPHUR_ORE", factor);
                scale(&mut side.upgrade, "CORRUPTED_FRAGMENT", factor);
            }
            if node == "Chicken" && !has(ENCHANTED_EGG) {
                scale(&mut side.upgrade, "SULPHUR_ORE", 0.0);
                scale(&mut side.upgrade, "CORRUPTED_FRAGMENT", 0.0);
            }
        }
        if has(ENCHANTED_EGG) {
            // one laid egg affected by drop multipliers plus one on kill
            scale(&mut side.upgrade, "EGG", 1.0 + drop);
        }
    } else if has(ENCHANTED_SHEARS) {
        scale(&mut side.upgrade, "WOOL", 0.0);
    }
    if has(SOULFLOW_ENGINE) && node == "Voidling" {
        scale(&mut side.cooldown, "RAW_SOULFLOW", 1.0 + 0.03 * config.tier as f64);
    }
}

/// Distillate and grade drops of Inferno fuel.
///
/// Returns the price of one fuel composed from its crafting components.
fn inferno_fuel(
    config: &Configuration,
    catalog: &Catalog,
    prices: &PriceBook<'_>,
    production: &mut Production,
    upgrade_drops: &mut Ledger,
    notes: &mut Notes,
) -> f64 {
    let harvests = production.harvests;
    let inferno = &catalog.inferno;

    match inferno.distillates.get(&config.inferno_distillate) {
        Some((item, per_drop)) => {
            upgrade_drops.insert(item.clone(), harvests * 4.0 / 5.0 * per_drop);
        }
        None => notes.warn(format!("{} is not a distillate", config.inferno_distillate)),
    }
    // distillate drops replace four in five main drops
    for amount in production.ledger.values_mut() {
        *amount /= 5.0;
    }

    if config.inferno_grade == HYPERGOLIC_GRADE {
        let multiplier = if config.inferno_eyedrops { 1.3 } else { 1.0 };
        for (item, chance) in &inferno.drops {
            let chance = if item == INFERNO_APEX && config.tier >= 10 {
                chance * 2.0
            } else {
                *chance
            };
            upgrade_drops.insert(item.clone(), multiplier * chance * harvests);
        }
        let duration = catalog.upgrade_stats(INFERNO_FUEL).0.duration;
        if duration > 0.0 {
            upgrade_drops.insert(
                IONIZED_CERAMICS.to_string(),
                production.window_seconds / duration,
            );
        }
    }

    let eyedrops = if config.inferno_eyedrops {
        prices.bazaar_buy(EYEDROPS, notes)
    } else {
        0.0
    };
    2.0 * prices.bazaar_buy(FUEL_BLOCK, notes)
        + 6.0 * prices.bazaar_buy(&config.inferno_distillate, notes)
        + prices.bazaar_buy(&config.inferno_grade, notes)
        + eyedrops
}
