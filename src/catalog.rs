//! The item and effect catalog.
//!
//! A [`Catalog`] is an immutable snapshot of everything the calculation reads:
//! item prices and experience, upgrade effects, node drop tables and build
//! costs, and the smaller lookup tables for chests, crystals and pets. Price
//! refreshes never mutate a catalog in place; [`crate::bazaar`] builds a new
//! snapshot instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{PetType, Rarity, Skill, NONE, NO_PET};

/// Prices of one item per venue. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prices {
    pub npc: Option<f64>,
    /// Bazaar insta-buy price (lowest sell offer).
    pub buy_price: Option<f64>,
    /// Bazaar insta-sell price (highest buy order).
    pub sell_price: Option<f64>,
    pub custom: Option<f64>,
}

/// Price field selected for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Npc,
    BuyPrice,
    SellPrice,
    Custom,
}

impl Prices {
    pub fn get(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Npc => self.npc,
            PriceField::BuyPrice => self.buy_price,
            PriceField::SellPrice => self.sell_price,
            PriceField::Custom => self.custom,
        }
    }
}

/// Experience gained per item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpYield {
    pub skill: Skill,
    pub amount: f64,
}

/// What an upgrade does beyond its flat speed and drop bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Renames drops, e.g. an auto smelter turning ore into ingots.
    Replace { map: BTreeMap<String, String> },
    /// Adds items every harvest, e.g. corrupt soil.
    Add { items: BTreeMap<String, f64> },
    /// Creates items with a chance per produced item, e.g. diamond spreading.
    Generate { chance: f64, items: BTreeMap<String, f64> },
    /// Creates items on a cooldown in seconds, e.g. soulflow engines.
    Timer { cooldown: f64, items: BTreeMap<String, f64> },
    /// Compacts once with the compactor recipes.
    Compact,
    /// Compacts repeatedly with the super compactor recipes.
    SuperCompact,
}

/// Flat bonuses and effects of a fuel or upgrade item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeStats {
    /// Speed bonus in percent.
    pub speed: f64,
    /// Drop multiplier.
    pub drop: f64,
    /// Lifetime in seconds; 0 means it lasts forever.
    pub duration: f64,
    pub effects: Vec<UpgradeEffect>,
}

impl Default for UpgradeStats {
    fn default() -> Self {
        Self {
            speed: 0.0,
            drop: 1.0,
            duration: 0.0,
            effects: Vec::new(),
        }
    }
}

impl UpgradeStats {
    pub fn has_effect(&self, wanted: impl Fn(&UpgradeEffect) -> bool) -> bool {
        self.effects.iter().any(wanted)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub display: String,
    pub prices: Prices,
    pub xp: Option<XpYield>,
    pub upgrade: Option<UpgradeStats>,
    /// Lifetime in seconds for consumables that are not upgrades.
    pub duration: Option<f64>,
}

/// Static data of one node type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeEntry {
    /// Items per harvest, by item ID.
    pub drops: BTreeMap<String, f64>,
    /// Seconds per action, by tier.
    pub speed: BTreeMap<u32, f64>,
    /// Crafting materials, by tier.
    pub costs: BTreeMap<u32, BTreeMap<String, f64>>,
    /// Extra non-item costs by tier; "COINS" is added to the coin cost.
    pub extra_costs: BTreeMap<u32, BTreeMap<String, f64>>,
    /// Storage slots replacing the standard storage, by tier.
    pub storage: BTreeMap<u32, u32>,
    /// Corruption drop multiplier while attended.
    pub afk_corrupt: Option<f64>,
    pub notes: BTreeMap<String, String>,
}

/// A compacting recipe: `per` of the source make `amount` of `makes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub makes: String,
    pub per: f64,
    #[serde(default = "one")]
    pub amount: f64,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    pub speed: f64,
    pub affects: Vec<String>,
}

/// A pet that speeds up nodes while the player is on the island.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostPet {
    pub affects: Vec<String>,
    /// (base bonus, bonus per level) by rarity.
    pub rarities: BTreeMap<Rarity, (f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetEntry {
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub rarity: Rarity,
}

/// A pet item boosting pet experience of one skill (or all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetXpItem {
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub percent: f64,
}

/// Price of a pet at level 1 and at max level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetCost {
    pub min: f64,
    pub max: f64,
}

/// Data of the grade-selectable Inferno Minion Fuel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfernoFuel {
    /// Extra speed multiplier by grade item.
    pub grades: BTreeMap<String, f64>,
    /// Distillate item -> (dropped item, amount per drop).
    pub distillates: BTreeMap<String, (String, f64)>,
    /// Hypergolic drop chances per harvest.
    pub drops: BTreeMap<String, f64>,
}

/// Immutable snapshot of all reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub items: BTreeMap<String, ItemEntry>,
    pub nodes: BTreeMap<String, NodeEntry>,
    pub compactor: BTreeMap<String, Recipe>,
    pub super_compactor: BTreeMap<String, Recipe>,
    /// Storage slots of a node without override, by tier.
    pub standard_storage: BTreeMap<u32, u32>,
    /// Storage slots by chest item ID ("NONE" included).
    pub chests: BTreeMap<String, u32>,
    /// Sell price multiplier by hopper item ID ("NONE" included).
    pub hoppers: BTreeMap<String, f64>,
    /// Selectable fuels, in option order ("NONE" first).
    pub fuels: Vec<String>,
    /// Selectable upgrades, in option order ("NONE" first).
    pub upgrades: Vec<String>,
    pub crystals: BTreeMap<String, Crystal>,
    pub boost_pets: BTreeMap<String, BoostPet>,
    pub pets: BTreeMap<String, PetEntry>,
    pub pet_xp_items: BTreeMap<String, PetXpItem>,
    pub max_pet_xp: BTreeMap<Rarity, f64>,
    pub pet_costs: BTreeMap<String, PetCost>,
    /// Materials per beacon level.
    pub beacon_materials: BTreeMap<u32, BTreeMap<String, f64>>,
    /// Materials per floating crystal.
    pub crystal_materials: BTreeMap<String, BTreeMap<String, f64>>,
    /// Shards needed per attribute level, by shard rarity.
    pub attribute_shards: BTreeMap<Rarity, BTreeMap<u32, f64>>,
    pub inferno: InfernoFuel,
}

impl Catalog {
    pub fn item(&self, id: &str) -> Option<&ItemEntry> {
        self.items.get(id)
    }

    pub fn node(&self, name: &str) -> Option<&NodeEntry> {
        self.nodes.get(name)
    }

    /// Display name of an item, falling back to its ID.
    pub fn display<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map_or(id, |item| item.display.as_str())
    }

    /// Item ID for a display name.
    pub fn id_for_display(&self, display: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(_, item)| item.display == display)
            .map(|(id, _)| id.as_str())
    }

    /// Upgrade stats of a fuel or upgrade; empty slots and unknown items are
    /// neutral. The boolean is `false` when a non-empty ID was not found.
    pub fn upgrade_stats(&self, id: &str) -> (UpgradeStats, bool) {
        if id == NONE {
            return (UpgradeStats::default(), true);
        }
        match self.items.get(id).and_then(|item| item.upgrade.clone()) {
            Some(stats) => (stats, true),
            None => (UpgradeStats::default(), false),
        }
    }

    /// Tiers available for a node, ascending.
    pub fn tiers(&self, node: &str) -> Vec<u32> {
        self.nodes
            .get(node)
            .map(|entry| entry.speed.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Node names sorted by name, which is also their option order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Hopper IDs sorted by ID, which is also their option order.
    pub fn hopper_ids(&self) -> Vec<String> {
        self.hoppers.keys().cloned().collect()
    }

    pub fn chest_ids(&self) -> Vec<String> {
        self.chests.keys().cloned().collect()
    }

    /// Crystal names sorted by name, "None" first.
    pub fn crystal_names(&self) -> Vec<String> {
        with_first(NO_PET, self.crystals.keys().cloned())
    }

    /// Boost pet names sorted by name, "None" first.
    pub fn boost_pet_names(&self) -> Vec<String> {
        with_first(NO_PET, self.boost_pets.keys().cloned())
    }

    /// Pet names sorted by name, "None" first.
    pub fn pet_names(&self) -> Vec<String> {
        with_first(NO_PET, self.pets.keys().cloned())
    }

    /// Pet xp item IDs sorted by ID, "NONE" first.
    pub fn pet_xp_item_ids(&self) -> Vec<String> {
        with_first(NONE, self.pet_xp_items.keys().cloned())
    }

    pub fn inferno_grades(&self) -> Vec<String> {
        self.inferno.grades.keys().cloned().collect()
    }

    pub fn inferno_distillates(&self) -> Vec<String> {
        self.inferno.distillates.keys().cloned().collect()
    }
}

fn with_first(first: &str, rest: impl Iterator<Item = String>) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(rest.filter(|name| name != first))
        .collect()
}
