//! Setup IDs: a compact text form of a [`Configuration`].
//!
//! An ID is the format version, `!`, then every input field in a fixed order.
//! A field with a fixed option set is one character, `48 + index`; a free
//! numeric field is its value between two `!`. The time windows are not
//! part of the ID.
//!
//! Options of catalog-backed fields (nodes, fuels, upgrades, ...) come from
//! the catalog, so an ID is only portable between identical catalogs.
//!
//! # Example
//!
//! ```
//! use minion_calc::codec::{decode, encode};
//! use minion_calc::data::embedded_catalog;
//! use minion_calc::models::Configuration;
//!
//! let catalog = embedded_catalog().unwrap();
//! let config = Configuration { amount: 25, ..Configuration::default() };
//! let id = encode(&config, &catalog).unwrap();
//! assert!(id.starts_with("1.1!"));
//!
//! let mut decoded = Configuration::default();
//! decode(&id, &catalog).apply(&mut decoded);
//! assert_eq!(decoded.amount, 25);
//! ```

use crate::catalog::Catalog;
use crate::error::CodecError;
use crate::models::{
    BazaarBuyType, BazaarSellType, Configuration, Mayor, OptionSet, Rarity, SellLocation,
};

/// Version written in front of every setup ID.
pub const VERSION: &str = "1.1";

/// Options of one field, or `None` for a free numeric value.
type Options = Option<Vec<String>>;

fn labels<T: OptionSet>() -> Options {
    Some(T::options().iter().map(|o| o.label().to_string()).collect())
}

fn numbers(range: std::ops::RangeInclusive<u32>) -> Options {
    Some(range.map(|n| n.to_string()).collect())
}

fn flag() -> Options {
    Some(vec!["false".to_string(), "true".to_string()])
}

/// Every encoded field with its options, in ID order.
fn fields(catalog: &Catalog) -> Vec<(&'static str, Options)> {
    vec![
        ("node", Some(catalog.node_names())),
        ("tier", numbers(1..=12)),
        ("amount", None),
        ("fuel", Some(catalog.fuels.clone())),
        ("inferno_grade", Some(catalog.inferno_grades())),
        ("inferno_distillate", Some(catalog.inferno_distillates())),
        ("inferno_eyedrops", flag()),
        ("hopper", Some(catalog.hopper_ids())),
        ("upgrade1", Some(catalog.upgrades.clone())),
        ("upgrade2", Some(catalog.upgrades.clone())),
        ("chest", Some(catalog.chest_ids())),
        ("beacon", numbers(0..=5)),
        ("scorched", flag()),
        ("free_fuel_beacon", flag()),
        ("beacon_acquired", flag()),
        ("infusion", flag()),
        ("crystal", Some(catalog.crystal_names())),
        ("free_will", flag()),
        ("postcard", flag()),
        ("afk", flag()),
        ("afk_pet", Some(catalog.boost_pet_names())),
        ("afk_pet_rarity", labels::<Rarity>()),
        ("afk_pet_level", None),
        ("enchanted_clock", flag()),
        ("special_layout", flag()),
        ("player_harvests", flag()),
        ("player_looting", numbers(0..=5)),
        ("potato_talisman", flag()),
        ("wisdom.combat", None),
        ("wisdom.mining", None),
        ("wisdom.farming", None),
        ("wisdom.fishing", None),
        ("wisdom.foraging", None),
        ("wisdom.alchemy", None),
        ("mayor", labels::<Mayor>()),
        ("leveling_pet", Some(catalog.pet_names())),
        ("taming", None),
        ("falcon_attribute", numbers(0..=10)),
        ("toucan_attribute", numbers(0..=10)),
        ("pet_xp_item", Some(catalog.pet_xp_item_ids())),
        ("beastmaster", None),
        ("exp_share_pet1", Some(catalog.pet_names())),
        ("exp_share_pet2", Some(catalog.pet_names())),
        ("exp_share_pet3", Some(catalog.pet_names())),
        ("exp_share_item", flag()),
        ("often_empty", flag()),
        ("sell_location", labels::<SellLocation>()),
        ("bazaar_sell_type", labels::<BazaarSellType>()),
        ("bazaar_buy_type", labels::<BazaarBuyType>()),
        ("bazaar_taxes", flag()),
        ("bazaar_flipper", numbers(0..=2)),
    ]
}

/// Text form of one field's value.
fn read(config: &Configuration, field: &str) -> String {
    match field {
        "node" => config.node.clone(),
        "tier" => config.tier.to_string(),
        "amount" => config.amount.to_string(),
        "fuel" => config.fuel.clone(),
        "inferno_grade" => config.inferno_grade.clone(),
        "inferno_distillate" => config.inferno_distillate.clone(),
        "inferno_eyedrops" => config.inferno_eyedrops.to_string(),
        "hopper" => config.hopper.clone(),
        "upgrade1" => config.upgrade1.clone(),
        "upgrade2" => config.upgrade2.clone(),
        "chest" => config.chest.clone(),
        "beacon" => config.beacon.to_string(),
        "scorched" => config.scorched.to_string(),
        "free_fuel_beacon" => config.free_fuel_beacon.to_string(),
        "beacon_acquired" => config.beacon_acquired.to_string(),
        "infusion" => config.infusion.to_string(),
        "crystal" => config.crystal.clone(),
        "free_will" => config.free_will.to_string(),
        "postcard" => config.postcard.to_string(),
        "afk" => config.afk.to_string(),
        "afk_pet" => config.afk_pet.clone(),
        "afk_pet_rarity" => config.afk_pet_rarity.label().to_string(),
        "afk_pet_level" => config.afk_pet_level.to_string(),
        "enchanted_clock" => config.enchanted_clock.to_string(),
        "special_layout" => config.special_layout.to_string(),
        "player_harvests" => config.player_harvests.to_string(),
        "player_looting" => config.player_looting.to_string(),
        "potato_talisman" => config.potato_talisman.to_string(),
        "wisdom.combat" => config.wisdom.combat.to_string(),
        "wisdom.mining" => config.wisdom.mining.to_string(),
        "wisdom.farming" => config.wisdom.farming.to_string(),
        "wisdom.fishing" => config.wisdom.fishing.to_string(),
        "wisdom.foraging" => config.wisdom.foraging.to_string(),
        "wisdom.alchemy" => config.wisdom.alchemy.to_string(),
        "mayor" => config.mayor.label().to_string(),
        "leveling_pet" => config.leveling_pet.clone(),
        "taming" => config.taming.to_string(),
        "falcon_attribute" => config.falcon_attribute.to_string(),
        "toucan_attribute" => config.toucan_attribute.to_string(),
        "pet_xp_item" => config.pet_xp_item.clone(),
        "beastmaster" => config.beastmaster.to_string(),
        "exp_share_pet1" => config.exp_share_pets[0].clone(),
        "exp_share_pet2" => config.exp_share_pets[1].clone(),
        "exp_share_pet3" => config.exp_share_pets[2].clone(),
        "exp_share_item" => config.exp_share_item.to_string(),
        "often_empty" => config.often_empty.to_string(),
        "sell_location" => config.sell_location.label().to_string(),
        "bazaar_sell_type" => config.bazaar_sell_type.label().to_string(),
        "bazaar_buy_type" => config.bazaar_buy_type.label().to_string(),
        "bazaar_taxes" => config.bazaar_taxes.to_string(),
        "bazaar_flipper" => config.bazaar_flipper.to_string(),
        _ => String::new(),
    }
}

fn parse<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CodecError> {
    value.parse().map_err(|_| CodecError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn option<T: OptionSet>(field: &'static str, value: &str) -> Result<T, CodecError> {
    T::from_label(value).ok_or_else(|| CodecError::UnknownOption {
        field,
        value: value.to_string(),
    })
}

/// Sets one field from its text form.
fn write(config: &mut Configuration, field: &'static str, value: &str) -> Result<(), CodecError> {
    match field {
        "node" => config.node = value.to_string(),
        "tier" => config.tier = parse(field, value)?,
        "amount" => config.amount = parse(field, value)?,
        "fuel" => config.fuel = value.to_string(),
        "inferno_grade" => config.inferno_grade = value.to_string(),
        "inferno_distillate" => config.inferno_distillate = value.to_string(),
        "inferno_eyedrops" => config.inferno_eyedrops = parse(field, value)?,
        "hopper" => config.hopper = value.to_string(),
        "upgrade1" => config.upgrade1 = value.to_string(),
        "upgrade2" => config.upgrade2 = value.to_string(),
        "chest" => config.chest = value.to_string(),
        "beacon" => config.beacon = parse(field, value)?,
        "scorched" => config.scorched = parse(field, value)?,
        "free_fuel_beacon" => config.free_fuel_beacon = parse(field, value)?,
        "beacon_acquired" => config.beacon_acquired = parse(field, value)?,
        "infusion" => config.infusion = parse(field, value)?,
        "crystal" => config.crystal = value.to_string(),
        "free_will" => config.free_will = parse(field, value)?,
        "postcard" => config.postcard = parse(field, value)?,
        "afk" => config.afk = parse(field, value)?,
        "afk_pet" => config.afk_pet = value.to_string(),
        "afk_pet_rarity" => config.afk_pet_rarity = option(field, value)?,
        "afk_pet_level" => config.afk_pet_level = parse(field, value)?,
        "enchanted_clock" => config.enchanted_clock = parse(field, value)?,
        "special_layout" => config.special_layout = parse(field, value)?,
        "player_harvests" => config.player_harvests = parse(field, value)?,
        "player_looting" => config.player_looting = parse(field, value)?,
        "potato_talisman" => config.potato_talisman = parse(field, value)?,
        "wisdom.combat" => config.wisdom.combat = parse(field, value)?,
        "wisdom.mining" => config.wisdom.mining = parse(field, value)?,
        "wisdom.farming" => config.wisdom.farming = parse(field, value)?,
        "wisdom.fishing" => config.wisdom.fishing = parse(field, value)?,
        "wisdom.foraging" => config.wisdom.foraging = parse(field, value)?,
        "wisdom.alchemy" => config.wisdom.alchemy = parse(field, value)?,
        "mayor" => config.mayor = option(field, value)?,
        "leveling_pet" => config.leveling_pet = value.to_string(),
        "taming" => config.taming = parse(field, value)?,
        "falcon_attribute" => config.falcon_attribute = parse(field, value)?,
        "toucan_attribute" => config.toucan_attribute = parse(field, value)?,
        "pet_xp_item" => config.pet_xp_item = value.to_string(),
        "beastmaster" => config.beastmaster = parse(field, value)?,
        "exp_share_pet1" => config.exp_share_pets[0] = value.to_string(),
        "exp_share_pet2" => config.exp_share_pets[1] = value.to_string(),
        "exp_share_pet3" => config.exp_share_pets[2] = value.to_string(),
        "exp_share_item" => config.exp_share_item = parse(field, value)?,
        "often_empty" => config.often_empty = parse(field, value)?,
        "sell_location" => config.sell_location = option(field, value)?,
        "bazaar_sell_type" => config.bazaar_sell_type = option(field, value)?,
        "bazaar_buy_type" => config.bazaar_buy_type = option(field, value)?,
        "bazaar_taxes" => config.bazaar_taxes = parse(field, value)?,
        "bazaar_flipper" => config.bazaar_flipper = parse(field, value)?,
        _ => {
            return Err(CodecError::UnknownOption {
                field,
                value: value.to_string(),
            })
        }
    }
    Ok(())
}

/// Builds the setup ID of a configuration.
///
/// # Errors
///
/// Returns [`CodecError::UnknownOption`] when a field holds a value that is
/// not one of its options, e.g. a node missing from the catalog.
pub fn encode(config: &Configuration, catalog: &Catalog) -> Result<String, CodecError> {
    let mut id = format!("{VERSION}!");
    for (field, options) in fields(catalog) {
        let value = read(config, field);
        match options {
            None => {
                id.push('!');
                id.push_str(&value);
                id.push('!');
            }
            Some(options) => {
                let index = options
                    .iter()
                    .position(|o| *o == value)
                    .ok_or(CodecError::UnknownOption { field, value })?;
                let code = u32::try_from(48 + index)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(CodecError::OptionOutOfRange {
                        field,
                        index: index as i64,
                    })?;
                id.push(code);
            }
        }
    }
    Ok(id)
}

/// Field values decoded from a setup ID, in ID order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDelta {
    values: Vec<(&'static str, String)>,
}

impl ConfigDelta {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Decoded text value of a field, named like the configuration field
    /// (`wisdom.mining`, `exp_share_pet2`).
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrites the decoded fields of `config`; other fields are kept.
    pub fn apply(&self, config: &mut Configuration) {
        for (field, value) in &self.values {
            if let Err(error) = write(config, *field, value) {
                tracing::warn!(%error, "skipping undecodable field");
            }
        }
    }
}

/// Decodes a setup ID, reporting why it is invalid.
///
/// # Errors
///
/// Returns a [`CodecError`] when the version is missing or different, the ID
/// ends early, or a field holds an impossible value.
pub fn try_decode(id: &str, catalog: &Catalog) -> Result<ConfigDelta, CodecError> {
    let end = id.find('!').ok_or(CodecError::MissingVersion)?;
    let found = &id[..end];
    let version: f64 = found.parse().map_err(|_| CodecError::MissingVersion)?;
    let expected: f64 = VERSION.parse().map_err(|_| CodecError::MissingVersion)?;
    if version != expected {
        return Err(CodecError::VersionMismatch {
            expected: VERSION.to_string(),
            found: found.to_string(),
        });
    }

    let chars: Vec<char> = id[end + 1..].chars().collect();
    let mut at = 0;
    let mut delta = ConfigDelta::default();
    let mut scratch = Configuration::default();
    for (field, options) in fields(catalog) {
        let first = *chars.get(at).ok_or(CodecError::Truncated { field })?;
        let value = match options {
            None => {
                if first != '!' {
                    return Err(CodecError::InvalidValue {
                        field,
                        value: first.to_string(),
                    });
                }
                let close = chars[at + 1..]
                    .iter()
                    .position(|c| *c == '!')
                    .ok_or(CodecError::Truncated { field })?;
                let value: String = chars[at + 1..at + 1 + close].iter().collect();
                at += close + 2;
                value
            }
            Some(options) => {
                let index = first as i64 - 48;
                let value = usize::try_from(index)
                    .ok()
                    .and_then(|i| options.get(i))
                    .ok_or(CodecError::OptionOutOfRange { field, index })?;
                at += 1;
                value.clone()
            }
        };
        write(&mut scratch, field, &value)?;
        delta.values.push((field, value));
    }
    Ok(delta)
}

/// Decodes a setup ID; an invalid ID gives an empty delta and a warning.
pub fn decode(id: &str, catalog: &Catalog) -> ConfigDelta {
    match try_decode(id, catalog) {
        Ok(delta) => delta,
        Err(error) => {
            tracing::warn!(%error, "invalid setup ID");
            ConfigDelta::default()
        }
    }
}
