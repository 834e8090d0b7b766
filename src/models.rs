//! Data models and structures for the minion calculator.
//!
//! This module contains the input [`Configuration`], the enumerated option
//! sets it draws from, the per-invocation [`Outcome`] and the CSV row shape of
//! the item table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed, ordered set of options for an enumerated input.
///
/// The order is part of the setup ID format: the encoded character of a value
/// is `48 + index` into [`OptionSet::options`].
pub trait OptionSet: Sized + Copy + PartialEq + 'static {
    /// All options, in declaration order.
    fn options() -> &'static [Self];
    /// Human-readable label, also used for templates and the CLI.
    fn label(&self) -> &'static str;

    /// Looks an option up by its label.
    fn from_label(label: &str) -> Option<Self> {
        Self::options().iter().copied().find(|o| o.label() == label)
    }

    /// Index of this option inside [`OptionSet::options`].
    fn index(&self) -> usize {
        Self::options().iter().position(|o| o == self).unwrap_or(0)
    }
}

macro_rules! option_set {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl OptionSet for $name {
            fn options() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }
    };
}

/// Skill an experience drop counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Combat,
    Mining,
    Farming,
    Fishing,
    Foraging,
    Alchemy,
    Enchanting,
}

option_set!(Skill {
    Combat => "combat",
    Mining => "mining",
    Farming => "farming",
    Fishing => "fishing",
    Foraging => "foraging",
    Alchemy => "alchemy",
    Enchanting => "enchanting",
});

/// Skill affinity of a pet or pet item; `All` matches every skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    All,
    Combat,
    Mining,
    Farming,
    Fishing,
    Foraging,
    Alchemy,
    Enchanting,
}

impl PetType {
    /// Returns `true` if experience of `skill` counts as matching this type.
    pub fn matches(self, skill: Skill) -> bool {
        match self {
            PetType::All => true,
            PetType::Combat => skill == Skill::Combat,
            PetType::Mining => skill == Skill::Mining,
            PetType::Farming => skill == Skill::Farming,
            PetType::Fishing => skill == Skill::Fishing,
            PetType::Foraging => skill == Skill::Foraging,
            PetType::Alchemy => skill == Skill::Alchemy,
            PetType::Enchanting => skill == Skill::Enchanting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

option_set!(Rarity {
    Common => "Common",
    Uncommon => "Uncommon",
    Rare => "Rare",
    Epic => "Epic",
    Legendary => "Legendary",
    Mythic => "Mythic",
});

/// Mayor (or minister) of the month whose perks affect the economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mayor {
    #[default]
    None,
    Aatrox,
    Cole,
    Diana,
    Diaz,
    Finnegan,
    Foxy,
    Marina,
    Paul,
    Jerry,
    Derpy,
    Scorpius,
}

option_set!(Mayor {
    None => "None",
    Aatrox => "Aatrox",
    Cole => "Cole",
    Diana => "Diana",
    Diaz => "Diaz",
    Finnegan => "Finnegan",
    Foxy => "Foxy",
    Marina => "Marina",
    Paul => "Paul",
    Jerry => "Jerry",
    Derpy => "Derpy",
    Scorpius => "Scorpius",
});

/// Where produced items are sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SellLocation {
    #[default]
    Best,
    Bazaar,
    Hopper,
    Npc,
}

option_set!(SellLocation {
    Best => "Best (NPC/Bazaar)",
    Bazaar => "Bazaar",
    Hopper => "Hopper",
    Npc => "NPC",
});

/// How items are sold on the bazaar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BazaarSellType {
    #[default]
    SellOffer,
    InstaSell,
    Custom,
}

option_set!(BazaarSellType {
    SellOffer => "Sell Offer",
    InstaSell => "Insta Sell",
    Custom => "Custom",
});

/// How items are bought from the bazaar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BazaarBuyType {
    #[default]
    BuyOrder,
    InstaBuy,
    Custom,
}

option_set!(BazaarBuyType {
    BuyOrder => "Buy Order",
    InstaBuy => "Insta Buy",
    Custom => "Custom",
});

/// Unit of a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    Years,
    Weeks,
    #[default]
    Days,
    Hours,
    Minutes,
    Seconds,
    /// One harvest: an action interval times the actions per harvest.
    Harvests,
}

option_set!(TimeUnit {
    Years => "Years",
    Weeks => "Weeks",
    Days => "Days",
    Hours => "Hours",
    Minutes => "Minutes",
    Seconds => "Seconds",
    Harvests => "Harvests",
});

/// An amount of a [`TimeUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub amount: f64,
    pub unit: TimeUnit,
}

impl TimeSpan {
    pub fn new(amount: f64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self::new(1.0, TimeUnit::Days)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// Skill wisdom percentages of the player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wisdom {
    pub combat: f64,
    pub mining: f64,
    pub farming: f64,
    pub fishing: f64,
    pub foraging: f64,
    pub alchemy: f64,
}

impl Wisdom {
    /// Wisdom for a skill; skills without a wisdom stat return 0.
    pub fn get(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Combat => self.combat,
            Skill::Mining => self.mining,
            Skill::Farming => self.farming,
            Skill::Fishing => self.fishing,
            Skill::Foraging => self.foraging,
            Skill::Alchemy => self.alchemy,
            Skill::Enchanting => 0.0,
        }
    }
}

/// The complete input of one calculation.
///
/// String-valued choices (node, fuel, upgrades, hopper, chest, crystal, pets,
/// pet item, fuel grade and distillate) are keys into the
/// [`Catalog`](crate::catalog::Catalog); the sentinel `"NONE"` (items) or
/// `"None"` (pets, crystals) means the slot is empty.
///
/// # Example
///
/// ```
/// use minion_calc::models::{Configuration, TimeSpan, TimeUnit};
///
/// let config = Configuration {
///     node: "Cobblestone".to_string(),
///     tier: 11,
///     amount: 10,
///     afk: true,
///     total_time: TimeSpan::new(3.0, TimeUnit::Hours),
///     ..Configuration::default()
/// };
/// assert!(config.attended());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub node: String,
    pub tier: u32,
    pub amount: u32,
    pub fuel: String,
    pub inferno_grade: String,
    pub inferno_distillate: String,
    pub inferno_eyedrops: bool,
    pub hopper: String,
    pub upgrade1: String,
    pub upgrade2: String,
    pub chest: String,
    pub beacon: u32,
    pub scorched: bool,
    pub free_fuel_beacon: bool,
    pub beacon_acquired: bool,
    pub infusion: bool,
    pub crystal: String,
    pub free_will: bool,
    pub postcard: bool,
    pub afk: bool,
    pub afk_pet: String,
    pub afk_pet_rarity: Rarity,
    pub afk_pet_level: f64,
    pub enchanted_clock: bool,
    pub special_layout: bool,
    pub player_harvests: bool,
    pub player_looting: u32,
    pub potato_talisman: bool,
    pub wisdom: Wisdom,
    pub mayor: Mayor,
    pub leveling_pet: String,
    pub taming: f64,
    pub falcon_attribute: u32,
    pub toucan_attribute: u32,
    pub pet_xp_item: String,
    pub beastmaster: f64,
    pub exp_share_pets: [String; 3],
    pub exp_share_item: bool,
    pub often_empty: bool,
    pub sell_location: SellLocation,
    pub bazaar_sell_type: BazaarSellType,
    pub bazaar_buy_type: BazaarBuyType,
    pub bazaar_taxes: bool,
    pub bazaar_flipper: u32,
    pub total_time: TimeSpan,
    pub empty_time: TimeSpan,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            node: "Cobblestone".to_string(),
            tier: 12,
            amount: 1,
            fuel: NONE.to_string(),
            inferno_grade: "HYPERGOLIC_GABAGOOL".to_string(),
            inferno_distillate: "CRUDE_GABAGOOL_DISTILLATE".to_string(),
            inferno_eyedrops: true,
            hopper: NONE.to_string(),
            upgrade1: NONE.to_string(),
            upgrade2: NONE.to_string(),
            chest: NONE.to_string(),
            beacon: 0,
            scorched: false,
            free_fuel_beacon: false,
            beacon_acquired: false,
            infusion: false,
            crystal: NO_PET.to_string(),
            free_will: false,
            postcard: false,
            afk: false,
            afk_pet: NO_PET.to_string(),
            afk_pet_rarity: Rarity::Legendary,
            afk_pet_level: 0.0,
            enchanted_clock: false,
            special_layout: false,
            player_harvests: false,
            player_looting: 0,
            potato_talisman: false,
            wisdom: Wisdom::default(),
            mayor: Mayor::None,
            leveling_pet: NO_PET.to_string(),
            taming: 0.0,
            falcon_attribute: 0,
            toucan_attribute: 0,
            pet_xp_item: NONE.to_string(),
            beastmaster: 0.0,
            exp_share_pets: [NO_PET.to_string(), NO_PET.to_string(), NO_PET.to_string()],
            exp_share_item: false,
            often_empty: false,
            sell_location: SellLocation::Best,
            bazaar_sell_type: BazaarSellType::SellOffer,
            bazaar_buy_type: BazaarBuyType::BuyOrder,
            bazaar_taxes: true,
            bazaar_flipper: 1,
            total_time: TimeSpan::default(),
            empty_time: TimeSpan::default(),
        }
    }
}

/// Empty item slot (fuel, upgrades, hopper, chest, pet item).
pub const NONE: &str = "NONE";
/// Empty pet or crystal slot.
pub const NO_PET: &str = "None";

impl Configuration {
    /// AFK on the island without an Enchanted Clock: online behaviour.
    pub fn attended(&self) -> bool {
        self.afk && !self.enchanted_clock
    }

    /// AFK with an Enchanted Clock: offline yields, but island boosts apply.
    pub fn clock_override(&self) -> bool {
        self.afk && self.enchanted_clock
    }

    /// Boosts that need a loaded island apply when attended or under the clock.
    pub fn island_loaded(&self) -> bool {
        self.afk
    }

    /// The two configured upgrade slots, in slot order.
    pub fn upgrade_slots(&self) -> [&str; 2] {
        [self.upgrade1.as_str(), self.upgrade2.as_str()]
    }
}

/// Venue an item ended up being sold at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Npc,
    Bazaar,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Npc => f.write_str("NPC"),
            Venue::Bazaar => f.write_str("bazaar"),
        }
    }
}

/// Pet slot that receives experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PetSlot {
    Leveling,
    ExpShare1,
    ExpShare2,
    ExpShare3,
}

/// Leveling progress of one pet slot over the calculated window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProgress {
    pub slot: PetSlot,
    pub pet: String,
    /// Pet experience gained, in pet xp.
    pub pet_xp: f64,
    /// Fraction of a max-level pet produced.
    pub levelled: f64,
}

/// Advisory notes collected during one calculation, keyed by topic.
///
/// Warnings are also logged through `tracing` as they are raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notes {
    entries: BTreeMap<String, String>,
}

/// Key under which warnings are collected.
pub const WARNING_KEY: &str = "Warning";

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note for `topic`, replacing an earlier one.
    pub fn note(&mut self, topic: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(topic.into(), message.into());
    }

    /// Records a recoverable problem and logs it.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.entries
            .entry(WARNING_KEY.to_string())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(&message);
            })
            .or_insert(message);
    }

    pub fn get(&self, topic: &str) -> Option<&str> {
        self.entries.get(topic).map(String::as_str)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.entries.contains_key(topic)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every note of `other` into `self`.
    pub fn extend(&mut self, other: &BTreeMap<String, String>) {
        for (topic, message) in other {
            self.entries.insert(topic.clone(), message.clone());
        }
    }
}

/// Everything one calculation produces.
///
/// Item, profit and experience maps are already scaled by the node count and
/// by the ratio between the total window and the empty window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outcome {
    /// Setup ID of the configuration that produced this outcome.
    pub setup_id: String,
    /// Seconds per action after all speed bonuses.
    pub action_time: f64,
    /// Harvests over the total window, across all nodes.
    pub harvests: f64,
    /// Length of the window between emptying, in seconds.
    pub window_seconds: f64,
    /// Length of the total window, in seconds.
    pub total_seconds: f64,
    pub items: BTreeMap<String, f64>,
    pub sell_locations: BTreeMap<String, Venue>,
    pub item_profits: BTreeMap<String, f64>,
    pub item_profit: f64,
    pub xp: BTreeMap<Skill, f64>,
    pub pets: Vec<PetProgress>,
    pub pet_profit: f64,
    /// Operating cost: limited fuel and beacon power crystals.
    pub fuel_cost: f64,
    pub fuel_amount: f64,
    pub total_profit: f64,
    /// Seconds until storage is full; `None` when nothing is stored.
    pub fill_time: Option<f64>,
    pub used_storage: u64,
    pub available_storage: u32,
    pub setup_cost: f64,
    pub free_will_cost: f64,
    pub optimal_free_will_tier: u32,
    /// Non-coin build costs for all nodes, e.g. "2 Bits".
    pub extra_cost: String,
    pub notes: Notes,
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for the item table.
#[derive(Debug, Deserialize)]
pub struct ItemRow {
    /// Item ID
    pub id: String,
    /// Display name
    pub display: String,
    /// Price an NPC pays for one item
    pub npc: Option<f64>,
    /// Bazaar insta-buy price
    pub buy_price: Option<f64>,
    /// Bazaar insta-sell price
    pub sell_price: Option<f64>,
    /// Manually set price for items not traded on the bazaar
    pub custom: Option<f64>,
    /// Skill the item gives experience in
    pub xp_skill: Option<Skill>,
    /// Experience per item
    pub xp_amount: Option<f64>,
    /// Lifetime in seconds for consumables (fuels, power crystals)
    pub duration: Option<f64>,
}
