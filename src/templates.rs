//! Setup templates: named partial configurations.
//!
//! A template only touches the fields it names; everything else keeps the
//! value it had. [`Template::Clean`] is the exception and resets every input
//! except the node and its tier.

use std::fmt;
use std::str::FromStr;

use crate::models::{BazaarBuyType, BazaarSellType, Configuration, SellLocation, Wisdom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Clean,
    Corrupt,
    Compact,
    CompactCorrupt,
    CheapSpeed,
    NoPermanentSpeed,
    MaxSpeed,
    HyperSpeed,
    AfkWithPet,
    SoloWisdom,
    FullCoopWisdom,
    DragonLeveling,
    MaxedInferno,
}

impl Template {
    pub const ALL: [Template; 13] = [
        Template::Clean,
        Template::Corrupt,
        Template::Compact,
        Template::CompactCorrupt,
        Template::CheapSpeed,
        Template::NoPermanentSpeed,
        Template::MaxSpeed,
        Template::HyperSpeed,
        Template::AfkWithPet,
        Template::SoloWisdom,
        Template::FullCoopWisdom,
        Template::DragonLeveling,
        Template::MaxedInferno,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Clean => "Clean",
            Template::Corrupt => "Corrupt",
            Template::Compact => "Compact",
            Template::CompactCorrupt => "Compact Corrupt",
            Template::CheapSpeed => "Cheap speed",
            Template::NoPermanentSpeed => "No permanent speed",
            Template::MaxSpeed => "Max speed",
            Template::HyperSpeed => "Hyper speed",
            Template::AfkWithPet => "AFK with pet",
            Template::SoloWisdom => "Solo Wisdom",
            Template::FullCoopWisdom => "Full Coop Wisdom",
            Template::DragonLeveling => "GDrag Leveling",
            Template::MaxedInferno => "Maxed Inferno Minion",
        }
    }

    /// Applies the template on top of `config`.
    ///
    /// # Example
    ///
    /// ```
    /// use minion_calc::models::{Configuration, SellLocation};
    /// use minion_calc::templates::Template;
    ///
    /// let mut config = Configuration {
    ///     node: "Gravel".to_string(),
    ///     tier: 11,
    ///     afk: true,
    ///     ..Configuration::default()
    /// };
    /// Template::Corrupt.apply(&mut config);
    /// assert_eq!(config.upgrade1, "CORRUPT_SOIL");
    /// assert_eq!(config.sell_location, SellLocation::Hopper);
    /// assert!(config.afk);
    ///
    /// Template::Clean.apply(&mut config);
    /// assert_eq!(config.upgrade1, "NONE");
    /// assert_eq!((config.node.as_str(), config.tier), ("Gravel", 11));
    /// ```
    pub fn apply(self, config: &mut Configuration) {
        match self {
            Template::Clean => {
                *config = Configuration {
                    node: std::mem::take(&mut config.node),
                    tier: config.tier,
                    ..Configuration::default()
                };
            }
            Template::Corrupt => {
                config.hopper = "ENCHANTED_HOPPER".to_string();
                config.upgrade1 = "CORRUPT_SOIL".to_string();
                config.upgrade2 = "DIAMOND_SPREADING".to_string();
                config.sell_location = SellLocation::Hopper;
            }
            Template::Compact => {
                config.sell_location = SellLocation::Best;
                config.upgrade1 = "SUPER_COMPACTOR_3000".to_string();
            }
            Template::CompactCorrupt => {
                config.sell_location = SellLocation::Best;
                config.hopper = "ENCHANTED_HOPPER".to_string();
                config.upgrade1 = "SUPER_COMPACTOR_3000".to_string();
                config.upgrade2 = "CORRUPT_SOIL".to_string();
            }
            Template::CheapSpeed => {
                config.fuel = "ENCHANTED_LAVA_BUCKET".to_string();
                config.upgrade2 = "DIAMOND_SPREADING".to_string();
                speed_boosts(config, 0, false);
            }
            Template::NoPermanentSpeed => {
                config.fuel = "PLASMA_BUCKET".to_string();
                config.upgrade2 = "FLYCATCHER_UPGRADE".to_string();
                speed_boosts(config, 5, false);
            }
            Template::MaxSpeed => {
                config.fuel = "PLASMA_BUCKET".to_string();
                config.upgrade2 = "FLYCATCHER_UPGRADE".to_string();
                speed_boosts(config, 5, true);
            }
            Template::HyperSpeed => {
                config.fuel = "HYPER_CATALYST".to_string();
                config.upgrade2 = "FLYCATCHER_UPGRADE".to_string();
                speed_boosts(config, 5, true);
            }
            Template::AfkWithPet => {
                config.afk_pet_level = 100.0;
                config.afk = true;
            }
            Template::SoloWisdom => {
                config.wisdom = Wisdom {
                    combat: 109.0,
                    mining: 83.5,
                    farming: 72.5,
                    fishing: 55.5,
                    foraging: 93.82,
                    alchemy: config.wisdom.alchemy,
                };
            }
            Template::FullCoopWisdom => {
                // 8 coop members each boosted by cookie and god potion
                config.wisdom = Wisdom {
                    combat: 1060.0,
                    mining: 1060.0,
                    farming: 1060.0,
                    fishing: 1060.0,
                    foraging: 1060.0,
                    alchemy: config.wisdom.alchemy,
                };
            }
            Template::DragonLeveling => {
                config.leveling_pet = "Golden Dragon".to_string();
                config.exp_share_pets[0] = "Golden Dragon".to_string();
                config.exp_share_item = true;
                config.taming = 60.0;
                config.falcon_attribute = 10;
                config.toucan_attribute = 10;
                config.pet_xp_item = "PET_ITEM_COMBAT_SKILL_BOOST_EPIC".to_string();
            }
            Template::MaxedInferno => {
                config.node = "Inferno".to_string();
                config.amount = 31;
                config.fuel = "INFERNO_FUEL".to_string();
                config.inferno_grade = "HYPERGOLIC_GABAGOOL".to_string();
                config.inferno_distillate = "CRUDE_GABAGOOL_DISTILLATE".to_string();
                config.inferno_eyedrops = true;
                config.sell_location = SellLocation::Best;
                config.upgrade1 = "FLYCATCHER_UPGRADE".to_string();
                config.upgrade2 = "FLYCATCHER_UPGRADE".to_string();
                config.chest = "XXLARGE_STORAGE".to_string();
                config.scorched = true;
                speed_boosts(config, 5, true);
                config.bazaar_sell_type = BazaarSellType::SellOffer;
                config.bazaar_buy_type = BazaarBuyType::BuyOrder;
            }
        }
    }
}

fn speed_boosts(config: &mut Configuration, beacon: u32, permanent: bool) {
    config.beacon = beacon;
    config.infusion = permanent;
    config.free_will = permanent;
    config.postcard = true;
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown template: {s}"))
    }
}
