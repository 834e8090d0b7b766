//! Tests for prices, sell venues and experience.

mod common;

use common::{approx, fixture, test_config};
use minion_calc::economy::{experience, sell_all, Action, Market, PriceBook};
use minion_calc::models::{
    BazaarBuyType, BazaarSellType, Configuration, Mayor, Notes, SellLocation, Skill, Venue,
    Wisdom, WARNING_KEY,
};
use minion_calc::yields::Ledger;

fn ledger(entries: &[(&str, f64)]) -> Ledger {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_tax_multiplier() {
    let catalog = fixture();
    let taxed = Configuration::default();
    assert!(approx(PriceBook::new(&catalog, &taxed).bazaar_tax_multiplier(), 0.98875));

    let derpy = Configuration {
        bazaar_flipper: 0,
        mayor: Mayor::Derpy,
        ..Configuration::default()
    };
    assert!(approx(PriceBook::new(&catalog, &derpy).bazaar_tax_multiplier(), 0.95));

    let untaxed = test_config();
    assert_eq!(PriceBook::new(&catalog, &untaxed).bazaar_tax_multiplier(), 1.0);
}

#[test]
fn test_order_types_pick_fields() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        bazaar_buy_type: BazaarBuyType::InstaBuy,
        bazaar_sell_type: BazaarSellType::InstaSell,
        ..test_config()
    };
    let prices = PriceBook::new(&catalog, &config);

    assert_eq!(prices.bazaar_buy("E_A", &mut notes), 500.0);
    assert_eq!(prices.bazaar_sell("E_A", &mut notes), 400.0);
    assert_eq!(prices.price("E_A", Action::Buy, Market::Npc, false, &mut notes), 320.0);
    assert!(notes.is_empty());
}

#[test]
fn test_missing_prices_fall_back() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let prices = PriceBook::new(&catalog, &test_config());

    // no bazaar price: the NPC price is used
    assert_eq!(prices.bazaar_sell("GEM", &mut notes), 8.0);
    // no bazaar or NPC price: the custom price is used
    assert_eq!(prices.bazaar_buy("POSTCARD", &mut notes), 50.0);
    assert!(notes.is_empty());

    assert_eq!(prices.bazaar_sell("NO_PRICE", &mut notes), 0.0);
    assert!(notes.contains(WARNING_KEY), "A missing price should be reported");
}

#[test]
fn test_forced_field_does_not_fall_back() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let prices = PriceBook::new(&catalog, &test_config());

    assert_eq!(prices.custom_only("POSTCARD", &mut notes), 50.0);
    assert_eq!(prices.custom_only("A", &mut notes), 0.0);
    assert!(notes.contains(WARNING_KEY));
}

#[test]
fn test_custom_override_is_per_book() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let mut prices = PriceBook::new(&catalog, &test_config());
    prices.set_custom("A", 42.0);

    assert_eq!(prices.custom_only("A", &mut notes), 42.0);
    assert_eq!(prices.custom_price("A"), Some(42.0));
    assert_eq!(catalog.item("A").and_then(|a| a.prices.custom), None);
}

#[test]
fn test_best_venue() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let prices = PriceBook::new(&catalog, &test_config());

    assert_eq!(prices.sell("A", SellLocation::Best, &mut notes), (Venue::Bazaar, 2.0));
    assert_eq!(prices.sell("B", SellLocation::Best, &mut notes), (Venue::Npc, 3.0), "Ties go to the NPC");
    assert_eq!(prices.sell("TIE", SellLocation::Best, &mut notes), (Venue::Npc, 5.0));
    assert_eq!(prices.sell("A", SellLocation::Npc, &mut notes), (Venue::Npc, 1.0));
}

#[test]
fn test_hopper_sales() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        sell_location: SellLocation::Hopper,
        hopper: "HOP".to_string(),
        ..test_config()
    };
    let prices = PriceBook::new(&catalog, &config);

    let sales = sell_all(&ledger(&[("A", 10.0)]), &config, &prices, &mut notes);
    assert_eq!(sales.total, 5.0, "The hopper pays half the NPC price");
    assert_eq!(sales.item_profits["A"], 5.0);
    assert_eq!(sales.venues["A"], Venue::Npc);
}

#[test]
fn test_experience_with_wisdom() {
    let catalog = fixture();
    let items = ledger(&[("A", 10.0), ("B", 1.0), ("GEM", 4.0)]);
    let config = Configuration {
        wisdom: Wisdom {
            mining: 50.0,
            ..Wisdom::default()
        },
        ..test_config()
    };

    let xp = experience(&items, &config, &catalog);
    assert_eq!(xp[&Skill::Mining], 15.0);
    assert_eq!(xp[&Skill::Combat], 2.0);
    assert_eq!(xp.len(), 2, "Items without experience are skipped");

    let derpy = Configuration {
        mayor: Mayor::Derpy,
        ..config.clone()
    };
    assert_eq!(experience(&items, &derpy, &catalog)[&Skill::Mining], 22.5);

    let player = Configuration {
        afk: true,
        player_harvests: true,
        ..config
    };
    let xp = experience(&items, &player, &catalog);
    assert!(!xp.contains_key(&Skill::Combat), "Player harvests keep combat xp");
}
