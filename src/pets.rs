//! Pet leveling from skill experience.
//!
//! The leveling pet gains pet experience from every skill the node produces;
//! exp share pets receive a share of what the leveling pet gained. Dragon
//! pets level to 200 and are re-bought as eggs at 100, which
//! [`dragon_xp`] models with a carried remainder.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::economy::PriceBook;
use crate::models::{
    Configuration, Mayor, Notes, PetProgress, PetSlot, PetType, Skill, NONE, NO_PET,
};

/// Pets that use the two-stage dragon leveling.
pub const DRAGON_PETS: [&str; 2] = ["Golden Dragon", "Jade Dragon"];

/// Pet experience of a dragon at level 100.
pub const DRAGON_LEVEL_100: f64 = 25_353_230.0;
/// Pet experience of a dragon at level 200.
pub const DRAGON_LEVEL_200: f64 = 210_255_385.0;

const EXP_SHARE: &str = "PET_ITEM_EXP_SHARE";
const EXP_SHARE_DROP: &str = "PET_ITEM_EXP_SHARE_DROP";
const ENCHANTED_GOLD: &str = "ENCHANTED_GOLD";

/// Share of skill experience a pet receives from a skill outside its type.
pub fn type_factor(pet_type: PetType, skill: Skill) -> f64 {
    if pet_type.matches(skill) {
        1.0
    } else if matches!(skill, Skill::Alchemy | Skill::Enchanting) {
        1.0 / 12.0
    } else {
        1.0 / 3.0
    }
}

/// Pet experience multipliers for a pet gaining `skill` experience.
///
/// Returns the combined boost of taming, beastmaster, type match and perks,
/// and separately the multiplier of the leveling pet's item, which does not
/// apply to dragon eggs.
pub fn boosts(
    config: &Configuration,
    catalog: &Catalog,
    pet: &str,
    pet_type: PetType,
    skill: Skill,
) -> (f64, f64) {
    let mut boost = (1.0 + config.taming / 100.0)
        * (1.0 + config.beastmaster / 100.0)
        * type_factor(pet_type, skill);
    let item = match catalog.pet_xp_items.get(&config.pet_xp_item) {
        Some(item) if item.pet_type.matches(skill) => 1.0 + item.percent / 100.0,
        _ => 1.0,
    };
    if config.mayor == Mayor::Diana {
        boost *= 1.35;
    }
    if matches!(skill, Skill::Mining | Skill::Fishing) {
        boost *= 1.5;
    }
    if pet == "Reindeer" {
        boost *= 2.0;
    }
    if skill == Skill::Combat && config.falcon_attribute != 0 {
        boost *= 1.0 + config.falcon_attribute as f64 / 100.0;
    }
    (boost, item)
}

/// Pet experience a dragon gains from `gained_xp` skill experience.
///
/// `left_over` is the pet experience already on the current dragon; the
/// pet item only counts once the dragon is past level 100. Returns the pet
/// experience gained (whole level 200 dragons plus progress, minus the
/// starting progress) and the progress left on the last dragon.
///
/// # Example
///
/// ```
/// use minion_calc::pets::{dragon_xp, DRAGON_LEVEL_100};
///
/// let (gained, left) = dragon_xp(0.0, DRAGON_LEVEL_100, 1.0, 1.0);
/// assert_eq!(gained, 0.0);
/// assert_eq!(left, DRAGON_LEVEL_100);
/// ```
pub fn dragon_xp(gained_xp: f64, left_over: f64, boost: f64, item: f64) -> (f64, f64) {
    let skill_xp_per_pet = (DRAGON_LEVEL_200 + DRAGON_LEVEL_100 * (item - 1.0)) / (item * boost);
    let mut gained = -left_over;
    let mut skill_xp = gained_xp;
    if left_over <= DRAGON_LEVEL_100 {
        skill_xp += left_over / boost;
    } else {
        skill_xp += (left_over + DRAGON_LEVEL_100 * (item - 1.0)) / (boost * item);
    }
    gained += skill_xp.div_euclid(skill_xp_per_pet) * DRAGON_LEVEL_200;
    let remainder = skill_xp.rem_euclid(skill_xp_per_pet);
    let left = if remainder <= DRAGON_LEVEL_100 / boost {
        remainder * boost
    } else {
        remainder * boost * item + DRAGON_LEVEL_100 * (1.0 - item)
    };
    gained += left;
    (gained, left)
}

fn is_dragon(pet: &str) -> bool {
    DRAGON_PETS.contains(&pet)
}

/// Pet progress of every filled slot and the coins it is worth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetSummary {
    pub pets: Vec<PetProgress>,
    pub profit: f64,
}

/// Levels the configured pets with the node's skill experience.
///
/// `time_ratio` scales the levelled fractions and the profit to the total
/// window. Nothing is levelled without a leveling pet.
pub fn level(
    xp: &BTreeMap<Skill, f64>,
    config: &Configuration,
    prices: &PriceBook<'_>,
    time_ratio: f64,
    notes: &mut Notes,
) -> PetSummary {
    let catalog = prices.catalog();
    let mut summary = PetSummary::default();
    let main = config.leveling_pet.as_str();
    if main == NO_PET {
        return summary;
    }
    let Some(main_entry) = catalog.pets.get(main) else {
        notes.warn(format!("{main} is not a known pet"));
        return summary;
    };

    let mut main_xp: BTreeMap<Skill, f64> = BTreeMap::new();
    let mut left_over = 0.0;
    for (skill, amount) in xp {
        let (boost, item) = boosts(config, catalog, main, main_entry.pet_type, *skill);
        let gained = if is_dragon(main) {
            let (gained, left) = dragon_xp(*amount, left_over, boost, item);
            left_over = left;
            gained
        } else {
            amount * boost * item
        };
        main_xp.insert(*skill, gained);
    }

    let mut slots = vec![(PetSlot::Leveling, main.to_string(), main_xp.values().sum::<f64>())];

    let share_boost = 0.2 * config.taming
        + if config.mayor == Mayor::Diana { 10.0 } else { 0.0 }
        + config.toucan_attribute as f64;
    let share_item = if config.exp_share_item { 15.0 } else { 0.0 };
    let share_slots = [PetSlot::ExpShare1, PetSlot::ExpShare2, PetSlot::ExpShare3];
    for (slot, pet) in share_slots.into_iter().zip(config.exp_share_pets.iter()) {
        if pet != NO_PET {
            match catalog.pets.get(pet) {
                Some(entry) => {
                    let shared =
                        share_xp(&main_xp, pet, entry.pet_type, share_boost, share_item);
                    slots.push((slot, pet.clone(), shared));
                }
                None => notes.warn(format!("{pet} is not a known pet")),
            }
        }
        // only the first slot shares unless Diana is mayor
        if config.mayor != Mayor::Diana {
            break;
        }
    }

    let exp_share_price = if config.exp_share_item {
        match prices.custom_price(EXP_SHARE) {
            Some(price) if price != 0.0 => price,
            _ => {
                prices.bazaar_buy(EXP_SHARE_DROP, notes)
                    + 72.0 * prices.bazaar_buy(ENCHANTED_GOLD, notes)
            }
        }
    } else {
        0.0
    };

    let mut profit = 0.0;
    for (slot, pet, pet_xp) in slots {
        let rarity = catalog.pets.get(&pet).map(|entry| entry.rarity);
        let max_xp = rarity
            .and_then(|r| catalog.max_pet_xp.get(&r))
            .copied()
            .unwrap_or(0.0);
        let levelled = if max_xp > 0.0 {
            pet_xp / max_xp
        } else {
            notes.warn(format!("{pet} has no max pet xp"));
            0.0
        };

        match catalog.pet_costs.get(&pet) {
            Some(cost) => profit += levelled * (cost.max - cost.min),
            None => notes.note("Pet Costs", format!("{pet} is not in pet costs.")),
        }
        if slot == PetSlot::Leveling && config.pet_xp_item != NONE {
            profit -= levelled * prices.custom_only(&config.pet_xp_item, notes);
        } else if config.exp_share_item {
            profit -= levelled * exp_share_price;
        }

        summary.pets.push(PetProgress {
            slot,
            pet,
            pet_xp: pet_xp * time_ratio,
            levelled: levelled * time_ratio,
        });
    }
    summary.profit = profit * time_ratio;
    tracing::debug!(pets = summary.pets.len(), profit = summary.profit, "pets levelled");
    summary
}

/// Pet experience an exp share pet receives from the leveling pet's gains.
fn share_xp(
    main_xp: &BTreeMap<Skill, f64>,
    pet: &str,
    pet_type: PetType,
    share_boost: f64,
    share_item: f64,
) -> f64 {
    if is_dragon(pet) {
        if share_boost == 0.0 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut left_over = 0.0;
        for (skill, amount) in main_xp {
            let boost = type_factor(pet_type, *skill) * (share_boost / 100.0);
            let item = 1.0 + share_item / share_boost;
            let (gained, left) = dragon_xp(*amount, left_over, boost, item);
            left_over = left;
            total += gained;
        }
        total
    } else {
        main_xp
            .iter()
            .map(|(skill, amount)| {
                amount * ((share_boost + share_item) / 100.0) * type_factor(pet_type, *skill)
            })
            .sum()
    }
}
