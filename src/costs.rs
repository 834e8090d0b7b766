//! Setup and operating costs.
//!
//! The setup cost is what it takes to build the configured nodes from
//! nothing: every tier's crafting materials, the installed items, and the
//! one-time island upgrades. The operating cost covers consumables burnt
//! over the window: limited fuel and beacon power crystals.

use std::collections::BTreeMap;

use crate::economy::PriceBook;
use crate::models::{Configuration, Notes, Rarity, NONE, NO_PET};

const COINS: &str = "COINS";
const FREE_WILL: &str = "FREE_WILL";
const POSTCARD: &str = "POSTCARD";
const POTATO_TALISMAN: &str = "POTATO_TALISMAN";
const MITHRIL_INFUSION: &str = "MITHRIL_INFUSION";
const POWER_CRYSTAL: &str = "POWER_CRYSTAL";
const SCORCHED_POWER_CRYSTAL: &str = "SCORCHED_POWER_CRYSTAL";
const SHARD_TOUCAN: &str = "SHARD_TOUCAN";
const SHARD_FALCON: &str = "SHARD_FALCON";

/// Cost of building the configured setup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupCost {
    /// Coins for all nodes and one-time upgrades.
    pub total: f64,
    /// Cumulative coin cost of one node, by tier.
    pub tier_costs: BTreeMap<u32, f64>,
    /// Expected Free Will cost for all nodes at the optimal tier.
    pub free_will_cost: f64,
    pub optimal_free_will_tier: u32,
    /// Non-coin costs for all nodes, e.g. "2000 Bits".
    pub extra_cost: String,
}

/// Chance that a Free Will makes a node of `tier` loyal.
pub fn free_will_chance(tier: u32) -> f64 {
    0.5 + 0.04 * (tier as f64 - 1.0)
}

/// Expected cost of making one node loyal at each tier, and the cheapest tier.
///
/// Every failed Free Will destroys a node, which must be rebuilt, and leaves
/// a postcard worth `postcard_value`. Ties go to the lowest tier.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use minion_calc::costs::optimal_free_will;
///
/// let tiers = BTreeMap::from([(1, 0.0), (2, 0.0)]);
/// let (tier, cost) = optimal_free_will(&tiers, 0.0, 100.0).unwrap();
/// assert_eq!(tier, 2);
/// assert!(cost < 200.0);
/// ```
pub fn optimal_free_will(
    tier_costs: &BTreeMap<u32, f64>,
    postcard_value: f64,
    free_will_price: f64,
) -> Option<(u32, f64)> {
    let mut best: Option<(u32, f64)> = None;
    for (tier, tier_cost) in tier_costs {
        let needed = 1.0 / free_will_chance(*tier);
        let cost = (needed - 1.0) * (tier_cost - postcard_value) + needed * free_will_price;
        if best.map_or(true, |(_, lowest)| cost < lowest) {
            best = Some((*tier, cost));
        }
    }
    best
}

/// Rounds to `digits` significant digits, keeping one decimal place.
///
/// ```
/// use minion_calc::costs::significant;
///
/// assert_eq!(significant(2.0, 2), "2.0");
/// assert_eq!(significant(1.0 / 0.54, 2), "1.9");
/// assert_eq!(significant(1.0 / 0.98, 2), "1.0");
/// ```
pub fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:.1}");
    }
    let exponent = value.abs().log10().floor() as i32;
    let places = (digits as i32 - 1 - exponent).max(0) as usize;
    let text = format!("{value:.places$}");
    match text.split_once('.') {
        Some((whole, fraction)) => match fraction.trim_end_matches('0') {
            "" => format!("{whole}.0"),
            kept => format!("{whole}.{kept}"),
        },
        None => format!("{text}.0"),
    }
}

/// "BITS" becomes "Bits", "GEMSTONE_POWDER" becomes "Gemstone Powder".
fn material_name(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cumulative coin cost per tier and the non-coin costs up to the
/// configured tier, for one node.
pub fn tier_costs(
    config: &Configuration,
    prices: &PriceBook<'_>,
    notes: &mut Notes,
) -> (BTreeMap<u32, f64>, BTreeMap<String, f64>) {
    let mut coins = BTreeMap::new();
    let mut extras: BTreeMap<String, f64> = BTreeMap::new();
    let Some(node) = prices.catalog().node(&config.node) else {
        return (coins, extras);
    };

    let mut cache: BTreeMap<String, f64> = BTreeMap::new();
    let mut running = 0.0;
    for tier in 1..=config.tier {
        if let Some(extra) = node.extra_costs.get(&tier) {
            for (material, amount) in extra {
                if material == COINS {
                    running += amount;
                } else {
                    *extras.entry(material_name(material)).or_insert(0.0) += amount;
                }
            }
        }
        match node.costs.get(&tier) {
            Some(materials) => {
                for (item, amount) in materials {
                    let price = match cache.get(item) {
                        Some(price) => *price,
                        None => {
                            let price = prices.bazaar_buy(item, notes);
                            cache.insert(item.clone(), price);
                            price
                        }
                    };
                    running += amount * price;
                }
            }
            None => notes.warn(format!("{} has no cost for tier {tier}", config.node)),
        }
        coins.insert(tier, running);
    }
    (coins, extras)
}

fn join_amounts(extras: &BTreeMap<String, f64>, factor: f64) -> String {
    extras
        .iter()
        .map(|(material, amount)| format!("{} {material}", amount * factor))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Estimates the cost of building the configured setup.
///
/// `upgrades` are the installed upgrades, including tools added for player
/// harvesting.
pub fn estimate(
    config: &Configuration,
    upgrades: &[String],
    prices: &PriceBook<'_>,
    notes: &mut Notes,
) -> SetupCost {
    let catalog = prices.catalog();
    let amount = config.amount as f64;
    let mut cost = SetupCost::default();

    let (tier_costs, extras) = tier_costs(config, prices, notes);
    if !extras.is_empty() {
        notes.note("Extra cost", format!("{} per minion", join_amounts(&extras, 1.0)));
        cost.extra_cost = join_amounts(&extras, amount);
    }
    let mut total = tier_costs.get(&config.tier).copied().unwrap_or(0.0);

    if config.fuel != NONE && catalog.upgrade_stats(&config.fuel).0.duration == 0.0 {
        total += prices.bazaar_buy(&config.fuel, notes);
    }
    if config.hopper != NONE {
        total += prices.bazaar_buy(&config.hopper, notes);
    }
    for upgrade in upgrades.iter().filter(|u| *u != NONE) {
        total += prices.bazaar_buy(upgrade, notes);
    }
    if config.infusion {
        total += prices.bazaar_buy(MITHRIL_INFUSION, notes);
    }

    let free_will_price = prices.bazaar_buy(FREE_WILL, notes);
    let postcard_value = match prices.custom_price(POSTCARD) {
        Some(price) if price != 0.0 => price,
        // a tier 1 node needs two Free Wills on average for a postcard
        _ => 2.0 * free_will_price,
    };
    if config.free_will {
        if let Some((tier, per_node)) =
            optimal_free_will(&tier_costs, postcard_value, free_will_price)
        {
            notes.note(
                "Free Will",
                format!(
                    "per minion, apply {} Free Wills on Tier {tier}",
                    significant(1.0 / free_will_chance(tier), 2)
                ),
            );
            cost.optimal_free_will_tier = tier;
            cost.free_will_cost = per_node * amount;
        }
    }

    total *= amount;

    if config.beacon != 0 && !config.beacon_acquired {
        for level in 1..=config.beacon {
            match catalog.beacon_materials.get(&level) {
                Some(materials) => {
                    for (item, count) in materials {
                        total += count * prices.bazaar_buy(item, notes);
                    }
                }
                None => notes.warn(format!("Beacon {level} has no material cost")),
            }
        }
    }
    if config.crystal != NO_PET {
        if let Some(materials) = catalog.crystal_materials.get(&config.crystal) {
            for (item, count) in materials {
                total += count * prices.bazaar_buy(item, notes);
            }
        }
    }
    if config.postcard {
        total += postcard_value;
    }
    if config.potato_talisman {
        total += prices.custom_only(POTATO_TALISMAN, notes);
    }
    if config.chest != NONE {
        total += prices.bazaar_buy(&config.chest, notes);
    }
    total += attribute_cost(config.toucan_attribute, Rarity::Epic, SHARD_TOUCAN, prices, notes);
    total += attribute_cost(config.falcon_attribute, Rarity::Rare, SHARD_FALCON, prices, notes);

    cost.total = total;
    cost.tier_costs = tier_costs;
    tracing::debug!(total = cost.total, "setup cost estimated");
    cost
}

fn attribute_cost(
    level: u32,
    rarity: Rarity,
    shard: &str,
    prices: &PriceBook<'_>,
    notes: &mut Notes,
) -> f64 {
    if level == 0 {
        return 0.0;
    }
    match prices
        .catalog()
        .attribute_shards
        .get(&rarity)
        .and_then(|levels| levels.get(&level))
    {
        Some(shards) => shards * prices.bazaar_buy(shard, notes),
        None => {
            notes.warn(format!("No shard count for level {level} of {shard}"));
            0.0
        }
    }
}

/// Operating cost of the window between emptying.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatingCost {
    /// Coins for fuel and power crystals over the total window.
    pub fuel_cost: f64,
    /// Fuel items needed over the total window, at least one per node when
    /// the fuel runs out.
    pub fuel_amount: f64,
}

/// Cost of limited fuel and beacon power crystals.
///
/// One power crystal feeds the whole island, so it is not multiplied by the
/// node count; a free fuel beacon costs nothing to run.
pub fn operating_cost(
    config: &Configuration,
    prices: &PriceBook<'_>,
    window_seconds: f64,
    time_ratio: f64,
    notes: &mut Notes,
) -> OperatingCost {
    let catalog = prices.catalog();
    let mut fuel_cost = 0.0;
    let mut needed = 0.0;

    if config.beacon != 0 && !config.free_fuel_beacon {
        let crystal = if config.scorched {
            SCORCHED_POWER_CRYSTAL
        } else {
            POWER_CRYSTAL
        };
        match catalog.item(crystal).and_then(|item| item.duration) {
            Some(duration) if duration > 0.0 => {
                fuel_cost += window_seconds * prices.bazaar_buy(crystal, notes) / duration;
            }
            _ => notes.warn(format!("{crystal} has no duration")),
        }
    }

    let duration = catalog.upgrade_stats(&config.fuel).0.duration;
    if config.fuel != NONE && duration != 0.0 {
        needed = config.amount as f64 * window_seconds / duration;
        fuel_cost += needed * prices.bazaar_buy(&config.fuel, notes);
    }

    OperatingCost {
        fuel_cost: fuel_cost * time_ratio,
        fuel_amount: if needed > 0.0 {
            (needed * time_ratio).max(config.amount as f64)
        } else {
            0.0
        },
    }
}
