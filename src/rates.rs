//! Action speed and drop multiplier of a node.
//!
//! Speed bonuses are additive percentages; drop multipliers compound, and
//! while attended they are floored after every upgrade slot.

use crate::catalog::Catalog;
use crate::models::{Configuration, Mayor, Notes, NO_PET};

/// Nodes that receive Cole's mining speed perk.
pub const MINING_NODES: [&str; 16] = [
    "Cobblestone", "Obsidian", "Glowstone", "Gravel", "Sand", "Ice", "Coal", "Iron", "Gold",
    "Diamond", "Lapis", "Redstone", "Emerald", "Quartz", "End Stone", "Mithril",
];

/// Item ID of the grade-selectable fuel.
pub const INFERNO_FUEL: &str = "INFERNO_FUEL";

/// Resolved rates of a node before harvest-mode adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Total speed bonus in percent.
    pub speed_bonus: f64,
    /// Seconds per action after all bonuses.
    pub seconds_per_action: f64,
    pub drop_multiplier: f64,
}

/// Engine-level overrides that are not part of a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overrides {
    /// Forces the Inferno node's Rising Celsius bonus to its maximum.
    pub rising_celsius: bool,
}

/// Adds up every speed bonus that applies to the configuration.
pub fn speed_bonus(
    config: &Configuration,
    catalog: &Catalog,
    overrides: Overrides,
    notes: &mut Notes,
) -> f64 {
    let island = config.island_loaded();
    let node = config.node.as_str();
    let mut bonus = 0.0;

    bonus += stats_of(catalog, &config.fuel, notes).speed;
    for upgrade in config.upgrade_slots() {
        bonus += stats_of(catalog, upgrade, notes).speed;
    }
    bonus += 2.0 * config.beacon as f64;
    bonus += if config.infusion { 10.0 } else { 0.0 };
    bonus += if config.free_will { 10.0 } else { 0.0 };
    bonus += if config.postcard { 5.0 } else { 0.0 };
    if config.potato_talisman && island && node == "Potato" {
        bonus += 5.0;
    }
    if config.crystal != NO_PET {
        match catalog.crystals.get(&config.crystal) {
            Some(crystal) if crystal.affects.iter().any(|n| n == node) => bonus += crystal.speed,
            Some(_) => {}
            None => notes.warn(format!("{} not in crystal list", config.crystal)),
        }
    }
    if config.beacon != 0 && config.scorched {
        bonus += 1.0;
    }
    if node == "Inferno" {
        bonus += if overrides.rising_celsius {
            180.0
        } else {
            18.0 * config.amount.min(10) as f64
        };
    }
    if config.mayor == Mayor::Cole && island && MINING_NODES.contains(&node) {
        bonus += 25.0;
    }
    if island && config.afk_pet != NO_PET {
        if let Some(pet) = catalog.boost_pets.get(&config.afk_pet) {
            if pet.affects.iter().any(|n| n == node) {
                if let Some((base, per_level)) = pet.rarities.get(&config.afk_pet_rarity) {
                    bonus += base + config.afk_pet_level * per_level;
                }
            }
        }
    }
    bonus
}

/// Multiplies the fuel and upgrade drop multipliers.
///
/// While attended, a multiplier above 1 is floored after each upgrade slot,
/// so two 1.5x upgrades give 1x, not 2x. Derpy doubles the result.
pub fn drop_multiplier(config: &Configuration, catalog: &Catalog, notes: &mut Notes) -> f64 {
    let attended = config.attended();
    let mut multiplier = stats_of(catalog, &config.fuel, notes).drop;
    for upgrade in config.upgrade_slots() {
        multiplier *= stats_of(catalog, upgrade, notes).drop;
        if attended && multiplier > 1.0 {
            multiplier = multiplier.trunc();
        }
    }
    if config.mayor == Mayor::Derpy {
        multiplier *= 2.0;
    }
    multiplier
}

/// Resolves the action interval and drop multiplier of the configured node.
pub fn resolve(
    config: &Configuration,
    catalog: &Catalog,
    overrides: Overrides,
    notes: &mut Notes,
) -> Rates {
    let speed_bonus = speed_bonus(config, catalog, overrides, notes);
    let drop_multiplier = drop_multiplier(config, catalog, notes);

    let base_speed = match catalog.node(&config.node).and_then(|n| n.speed.get(&config.tier)) {
        Some(speed) => *speed,
        None => {
            notes.warn(format!("{} has no tier {}", config.node, config.tier));
            0.0
        }
    };
    let mut seconds_per_action = base_speed / (1.0 + speed_bonus / 100.0);
    if config.fuel == INFERNO_FUEL {
        match catalog.inferno.grades.get(&config.inferno_grade) {
            Some(grade) => seconds_per_action /= 1.0 + grade,
            None => notes.warn(format!("{} is not a fuel grade", config.inferno_grade)),
        }
    }

    tracing::debug!(speed_bonus, drop_multiplier, seconds_per_action, "rates resolved");
    Rates {
        speed_bonus,
        seconds_per_action,
        drop_multiplier,
    }
}

fn stats_of(catalog: &Catalog, id: &str, notes: &mut Notes) -> crate::catalog::UpgradeStats {
    let (stats, found) = catalog.upgrade_stats(id);
    if !found {
        notes.warn(format!("{id} has no upgrade data"));
    }
    stats
}
