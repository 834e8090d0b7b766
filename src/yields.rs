//! Base production of a node over a time window.
//!
//! Turns the resolved [`Rates`] and the node's drop table into the working
//! ledger: item ID to quantity for a single node over the window between
//! emptying. Harvest modes (attended, special layouts, player harvests) change
//! the actions per harvest and may reset the drop multiplier.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::models::{Configuration, Notes, TimeSpan, TimeUnit};
use crate::rates::Rates;

/// Item ID to quantity.
pub type Ledger = BTreeMap<String, f64>;

/// Nodes whose drops are affected by the player's looting enchantment.
pub const MOB_NODES: [&str; 20] = [
    "Zombie", "Revenant", "Voidling", "Inferno", "Vampire", "Skeleton", "Creeper", "Spider",
    "Tarantula", "Cave Spider", "Blaze", "Magma Cube", "Enderman", "Ghast", "Slime", "Cow", "Pig",
    "Chicken", "Sheep", "Rabbit",
];

pub const TREE_NODES: [&str; 6] = ["Oak", "Spruce", "Birch", "Dark Oak", "Acacia", "Jungle"];

/// Nodes that harvest every action with a special layout while attended.
pub const LAYOUT_NODES: [&str; 7] = [
    "Cobblestone", "Mycelium", "Ice", "Flower", "Sand", "Red Sand", "Gravel",
];

/// Nodes the player cannot harvest for the node.
const NO_PLAYER_HARVEST: [&str; 3] = ["Fishing", "Pumpkin", "Melon"];

/// Tool the player is assumed to use on Gravel nodes.
pub const FLINT_SHOVEL: &str = "FLINT_SHOVEL";

/// Base production of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    pub actions_per_harvest: f64,
    pub seconds_per_action: f64,
    /// Drop multiplier still to apply to upgrade effects; 1 once folded
    /// into the harvest count.
    pub drop_multiplier: f64,
    /// Harvests of one node over the window.
    pub harvests: f64,
    /// Reported harvest count: all nodes over the total window.
    pub total_harvests: f64,
    /// Seconds in the window between emptying.
    pub window_seconds: f64,
    /// Total window divided by the window between emptying.
    pub time_ratio: f64,
    /// Upgrades in processing order, including tools the player adds.
    pub upgrades: Vec<String>,
    pub ledger: Ledger,
}

/// Converts a time span into seconds.
///
/// One harvest lasts `seconds_per_harvest`.
///
/// # Example
///
/// ```
/// use minion_calc::models::{TimeSpan, TimeUnit};
/// use minion_calc::yields::seconds;
///
/// assert_eq!(seconds(&TimeSpan::new(2.0, TimeUnit::Hours), 0.0), 7200.0);
/// assert_eq!(seconds(&TimeSpan::new(5.0, TimeUnit::Harvests), 20.0), 100.0);
/// ```
pub fn seconds(span: &TimeSpan, seconds_per_harvest: f64) -> f64 {
    let unit = match span.unit {
        TimeUnit::Years => 31_536_000.0,
        TimeUnit::Weeks => 604_800.0,
        TimeUnit::Days => 86_400.0,
        TimeUnit::Hours => 3_600.0,
        TimeUnit::Minutes => 60.0,
        TimeUnit::Seconds => 1.0,
        TimeUnit::Harvests => seconds_per_harvest,
    };
    unit * span.amount
}

/// Actions per harvest, the adjusted drop multiplier and the upgrade list
/// for the configured harvest mode.
pub fn harvest_mode(
    config: &Configuration,
    drop_multiplier: f64,
    notes: &mut Notes,
) -> (f64, f64, Vec<String>) {
    let node = config.node.as_str();
    let mut upgrades: Vec<String> = config.upgrade_slots().iter().map(|u| u.to_string()).collect();
    let mut drop = drop_multiplier;
    let mut actions = if node == "Fishing" { 1.0 } else { 2.0 };

    if !config.attended() {
        return (actions, drop, upgrades);
    }
    if node == "Pumpkin" || node == "Melon" {
        actions = 1.0;
    }
    if config.player_harvests {
        if NO_PLAYER_HARVEST.contains(&node) {
            notes.note("Player Harvests", "Player Harvesting does not work with this minion");
        } else {
            actions = 1.0;
            drop = 1.0;
            if node == "Gravel" {
                upgrades.push(FLINT_SHOVEL.to_string());
                notes.note("Player Tools", "Assuming Player is using Flint Shovel");
            }
            if node == "Ice" {
                notes.note("Player Tools", "Assuming Player is using Silk Touch");
            }
            if MOB_NODES.contains(&node) {
                drop *= 1.0 + 15.0 * config.player_looting as f64 / 100.0;
            }
        }
    } else if config.special_layout && LAYOUT_NODES.contains(&node) {
        actions = 1.0;
    }
    (actions, drop, upgrades)
}

/// Drop table of the node with the attended-dependent overrides applied.
pub fn drop_table(config: &Configuration, catalog: &Catalog, notes: &mut Notes) -> Ledger {
    let node = config.node.as_str();
    let attended = config.attended();
    let mut drops = match catalog.node(node) {
        Some(entry) => entry.drops.clone(),
        None => {
            notes.warn(format!("{node} is not a known minion"));
            Ledger::new()
        }
    };

    if TREE_NODES.contains(&node) {
        match catalog.id_for_display(&format!("{node} Wood")) {
            Some(wood) => {
                drops.insert(wood.to_string(), if attended { 4.0 } else { 3.0 });
            }
            None => notes.warn(format!("{node} Wood is not in the item list")),
        }
    }
    if node == "Flower" {
        drops = if attended && config.special_layout {
            weights(&[("YELLOW_FLOWER", 1.0), ("RED_ROSE", 1.0), ("SMALL_FLOWER", 8.0)], 10.0)
        } else {
            weights(
                &[
                    ("YELLOW_FLOWER", 1.0),
                    ("RED_ROSE", 1.0),
                    ("SMALL_FLOWER", 8.0),
                    ("LARGE_FLOWER", 4.0),
                ],
                14.0,
            )
        };
    }
    drops
}

fn weights(parts: &[(&str, f64)], total: f64) -> Ledger {
    parts
        .iter()
        .map(|(id, weight)| (id.to_string(), weight / total))
        .collect()
}

/// Simulates the base production of one node over the window.
///
/// Unattended nodes fold the drop multiplier into the harvest count, so the
/// returned multiplier is 1 for them.
pub fn simulate(
    config: &Configuration,
    catalog: &Catalog,
    rates: &Rates,
    notes: &mut Notes,
) -> Production {
    let (actions, mut drop, upgrades) = harvest_mode(config, rates.drop_multiplier, notes);
    let drops = drop_table(config, catalog, notes);
    let spa = rates.seconds_per_action;
    let seconds_per_harvest = spa * actions;

    let (window, time_ratio) = if config.often_empty {
        let empty = seconds(&config.empty_time, seconds_per_harvest);
        if empty > 0.0 {
            let total = seconds(&config.total_time, seconds_per_harvest);
            (config.empty_time, total / empty)
        } else {
            notes.warn("Empty time is zero, using the total time instead");
            (config.total_time, 1.0)
        }
    } else {
        (config.total_time, 1.0)
    };
    let window_seconds = seconds(&window, seconds_per_harvest);

    let mut harvests = if window.unit == TimeUnit::Harvests {
        window.amount
    } else if seconds_per_harvest > 0.0 {
        window_seconds / seconds_per_harvest
    } else {
        0.0
    };
    let total_harvests = config.amount as f64 * harvests * time_ratio;

    if !config.attended() {
        harvests *= drop;
        drop = 1.0;
    }

    let ledger: Ledger = drops
        .iter()
        .map(|(item, weight)| (item.clone(), harvests * weight * drop))
        .collect();

    tracing::debug!(actions, harvests, window_seconds, time_ratio, "base yields simulated");
    Production {
        actions_per_harvest: actions,
        seconds_per_action: spa,
        drop_multiplier: drop,
        harvests,
        total_harvests,
        window_seconds,
        time_ratio,
        upgrades,
        ledger,
    }
}
