//! Prices, sell venues and experience.
//!
//! [`PriceBook`] answers every price question of a calculation. It reads the
//! catalog snapshot, applies the configured bazaar order types, taxes and
//! mayor perks, and holds per-invocation custom prices (such as the composed
//! Inferno fuel price) without touching the catalog.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, PriceField};
use crate::models::{
    BazaarBuyType, BazaarSellType, Configuration, Mayor, Notes, SellLocation, Skill, Venue,
};
use crate::yields::Ledger;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

/// Where a trade happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    Bazaar,
    Npc,
    /// The manually set price.
    Custom,
}

/// Price lookups for one calculation.
#[derive(Debug, Clone)]
pub struct PriceBook<'a> {
    catalog: &'a Catalog,
    buy_type: BazaarBuyType,
    sell_type: BazaarSellType,
    taxes: bool,
    flipper: u32,
    mayor: Mayor,
    custom: BTreeMap<String, f64>,
}

impl<'a> PriceBook<'a> {
    pub fn new(catalog: &'a Catalog, config: &Configuration) -> Self {
        Self {
            catalog,
            buy_type: config.bazaar_buy_type,
            sell_type: config.bazaar_sell_type,
            taxes: config.bazaar_taxes,
            flipper: config.bazaar_flipper,
            mayor: config.mayor,
            custom: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Overrides the custom price of an item for this calculation only.
    pub fn set_custom(&mut self, id: impl Into<String>, price: f64) {
        self.custom.insert(id.into(), price);
    }

    /// Multiplier applied to bazaar sales after taxes.
    pub fn bazaar_tax_multiplier(&self) -> f64 {
        if !self.taxes {
            return 1.0;
        }
        let mut tax = 0.0125 - 0.00125 * self.flipper as f64;
        if self.mayor == Mayor::Derpy {
            tax *= 4.0;
        }
        1.0 - tax
    }

    /// Price of one item.
    ///
    /// The bazaar field is picked by the configured order type. A missing
    /// field falls back to the NPC price, then to the custom price, unless
    /// `force` is set, in which case the price is 0. Every miss that ends at
    /// 0 is recorded as a warning.
    pub fn price(
        &self,
        id: &str,
        action: Action,
        market: Market,
        force: bool,
        notes: &mut Notes,
    ) -> f64 {
        let mut multiplier = 1.0;
        let field = match (market, action) {
            (Market::Bazaar, Action::Buy) => match self.buy_type {
                BazaarBuyType::BuyOrder => PriceField::SellPrice,
                BazaarBuyType::InstaBuy => PriceField::BuyPrice,
                BazaarBuyType::Custom => PriceField::Custom,
            },
            (Market::Bazaar, Action::Sell) => {
                multiplier = self.bazaar_tax_multiplier();
                match self.sell_type {
                    BazaarSellType::SellOffer => PriceField::BuyPrice,
                    BazaarSellType::InstaSell => PriceField::SellPrice,
                    BazaarSellType::Custom => PriceField::Custom,
                }
            }
            (Market::Npc, Action::Buy) => {
                multiplier = 2.0;
                PriceField::Npc
            }
            (Market::Npc, Action::Sell) => PriceField::Npc,
            (Market::Custom, _) => PriceField::Custom,
        };

        let Some(item) = self.catalog.item(id) else {
            notes.warn(format!("{id} not in item list"));
            return 0.0;
        };
        let mut prices = item.prices.clone();
        if let Some(custom) = self.custom.get(id) {
            prices.custom = Some(*custom);
        }

        if let Some(value) = prices.get(field) {
            multiplier * value
        } else if force {
            notes.warn(format!("{id} has no forced price"));
            0.0
        } else if let Some(npc) = prices.npc {
            multiplier * npc
        } else if let Some(custom) = prices.custom {
            custom
        } else {
            notes.warn(format!("{id} has no price"));
            0.0
        }
    }

    pub fn bazaar_buy(&self, id: &str, notes: &mut Notes) -> f64 {
        self.price(id, Action::Buy, Market::Bazaar, false, notes)
    }

    pub fn bazaar_sell(&self, id: &str, notes: &mut Notes) -> f64 {
        self.price(id, Action::Sell, Market::Bazaar, false, notes)
    }

    pub fn npc_sell(&self, id: &str, notes: &mut Notes) -> f64 {
        self.price(id, Action::Sell, Market::Npc, false, notes)
    }

    /// The custom price if one is set, without warnings.
    pub fn custom_price(&self, id: &str) -> Option<f64> {
        self.custom
            .get(id)
            .copied()
            .or_else(|| self.catalog.item(id).and_then(|item| item.prices.custom))
    }

    /// The custom price only; 0 with a warning when unset.
    pub fn custom_only(&self, id: &str, notes: &mut Notes) -> f64 {
        self.price(id, Action::Buy, Market::Custom, true, notes)
    }

    /// Chooses the venue and unit price for selling an item.
    ///
    /// "Best" takes the higher of NPC and bazaar and prefers NPC on a tie.
    pub fn sell(&self, id: &str, location: SellLocation, notes: &mut Notes) -> (Venue, f64) {
        match location {
            SellLocation::Bazaar => (Venue::Bazaar, self.bazaar_sell(id, notes)),
            SellLocation::Npc | SellLocation::Hopper => (Venue::Npc, self.npc_sell(id, notes)),
            SellLocation::Best => {
                let npc = self.npc_sell(id, notes);
                let bazaar = self.bazaar_sell(id, notes);
                if bazaar > npc {
                    (Venue::Bazaar, bazaar)
                } else {
                    (Venue::Npc, npc)
                }
            }
        }
    }
}

/// Coins earned by selling a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sales {
    pub venues: BTreeMap<String, Venue>,
    /// Coins per item, hopper factor included.
    pub item_profits: BTreeMap<String, f64>,
    /// Coins for the whole ledger, hopper factor included.
    pub total: f64,
}

/// Sells every item of the ledger at the configured location.
///
/// Selling through a hopper multiplies every price by the hopper's factor.
pub fn sell_all(
    ledger: &Ledger,
    config: &Configuration,
    prices: &PriceBook<'_>,
    notes: &mut Notes,
) -> Sales {
    let hopper = if config.sell_location == SellLocation::Hopper {
        match prices.catalog.hoppers.get(&config.hopper) {
            Some(factor) => *factor,
            None => {
                notes.warn(format!("{} is not a hopper", config.hopper));
                0.0
            }
        }
    } else {
        1.0
    };

    let mut sales = Sales::default();
    for (item, amount) in ledger {
        let (venue, price) = prices.sell(item, config.sell_location, notes);
        sales.venues.insert(item.clone(), venue);
        sales.item_profits.insert(item.clone(), amount * price * hopper);
        sales.total += amount * price;
    }
    sales.total *= hopper;
    sales
}

/// Skill experience earned from a ledger.
///
/// Wisdom of the skill scales the experience; Derpy multiplies it by 1.5.
/// Combat experience is dropped when the player does the harvesting.
pub fn experience(
    ledger: &Ledger,
    config: &Configuration,
    catalog: &Catalog,
) -> BTreeMap<Skill, f64> {
    let mut xp = BTreeMap::new();
    for (item, amount) in ledger {
        let Some(per_item) = catalog.item(item).and_then(|entry| entry.xp) else {
            continue;
        };
        *xp.entry(per_item.skill).or_insert(0.0) +=
            amount * per_item.amount * (1.0 + config.wisdom.get(per_item.skill) / 100.0);
    }
    if config.mayor == Mayor::Derpy {
        for value in xp.values_mut() {
            *value *= 1.5;
        }
    }
    if config.attended() && config.player_harvests {
        xp.remove(&Skill::Combat);
    }
    xp
}
