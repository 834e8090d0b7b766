//! Tests for setup and operating costs.

mod common;

use std::collections::BTreeMap;

use common::{approx, fixture, test_config};
use minion_calc::costs::{
    estimate, free_will_chance, operating_cost, optimal_free_will, tier_costs,
};
use minion_calc::economy::PriceBook;
use minion_calc::models::{Configuration, Notes};

fn tier_two(amount: u32) -> Configuration {
    Configuration {
        tier: 2,
        amount,
        ..test_config()
    }
}

#[test]
fn test_free_will_chance() {
    assert_eq!(free_will_chance(1), 0.5);
    assert!(approx(free_will_chance(11), 0.9));
}

#[test]
fn test_free_will_ties_go_to_lowest_tier() {
    let tiers = BTreeMap::from([(3, 0.0), (1, 0.0), (2, 0.0)]);
    assert_eq!(optimal_free_will(&tiers, 0.0, 0.0), Some((1, 0.0)));
    assert_eq!(optimal_free_will(&BTreeMap::new(), 0.0, 10.0), None);
}

#[test]
fn test_tier_costs_are_cumulative() {
    let catalog = fixture();
    let prices = PriceBook::new(&catalog, &tier_two(1));
    let mut notes = Notes::new();

    let (coins, extras) = tier_costs(&tier_two(1), &prices, &mut notes);
    // 10 A at 2, then 1 E_A at 400 plus 100 coins
    assert_eq!(coins, BTreeMap::from([(1, 20.0), (2, 520.0)]));
    assert_eq!(extras, BTreeMap::from([("Bits".to_string(), 50.0)]));
}

#[test]
fn test_setup_cost_with_extras() {
    let catalog = fixture();
    let config = tier_two(2);
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    let cost = estimate(&config, &[], &prices, &mut notes);
    assert_eq!(cost.total, 1040.0);
    assert_eq!(cost.extra_cost, "100 Bits");
    assert_eq!(notes.get("Extra cost"), Some("50 Bits per minion"));
    assert_eq!(cost.free_will_cost, 0.0, "Free Will is only costed when wanted");

    let hopper = Configuration {
        hopper: "HOP".to_string(),
        ..config.clone()
    };
    let cost = estimate(&hopper, &["BOOST_A".to_string()], &prices, &mut notes);
    assert_eq!(cost.total, (520.0 + 20.0 + 50.0) * 2.0);
}

#[test]
fn test_optimal_free_will_in_setup() {
    let catalog = fixture();
    let config = Configuration {
        free_will: true,
        ..tier_two(2)
    };
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    let cost = estimate(&config, &[], &prices, &mut notes);
    // tier 1: one lost node worth 20 minus a 50 postcard, plus two Free Wills
    assert_eq!(cost.optimal_free_will_tier, 1);
    assert!(approx(cost.free_will_cost, 340.0), "Got {}", cost.free_will_cost);
    assert_eq!(
        notes.get("Free Will"),
        Some("per minion, apply 2.0 Free Wills on Tier 1")
    );
}

#[test]
fn test_one_time_upgrades_are_not_per_node() {
    let catalog = fixture();
    let config = Configuration {
        postcard: true,
        chest: "CHEST".to_string(),
        ..tier_two(2)
    };
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    let cost = estimate(&config, &[], &prices, &mut notes);
    assert_eq!(cost.total, 1040.0 + 50.0 + 5.0);
}

#[test]
fn test_operating_cost() {
    let catalog = fixture();
    let config = Configuration {
        beacon: 1,
        fuel: "FAST_FUEL".to_string(),
        ..tier_two(2)
    };
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    // two hours: 2 power crystals and 4 fuels
    let cost = operating_cost(&config, &prices, 7200.0, 1.0, &mut notes);
    assert!(approx(cost.fuel_cost, 240.0), "Got {}", cost.fuel_cost);
    assert!(approx(cost.fuel_amount, 4.0));

    // a short window still needs one fuel per node
    let cost = operating_cost(&config, &prices, 7200.0, 0.25, &mut notes);
    assert!(approx(cost.fuel_cost, 60.0));
    assert_eq!(cost.fuel_amount, 2.0);
}

#[test]
fn test_free_fuel_beacon_and_no_fuel() {
    let catalog = fixture();
    let config = Configuration {
        beacon: 1,
        free_fuel_beacon: true,
        ..tier_two(2)
    };
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    let cost = operating_cost(&config, &prices, 7200.0, 1.0, &mut notes);
    assert_eq!(cost.fuel_cost, 0.0);
    assert_eq!(cost.fuel_amount, 0.0);
}

#[test]
fn test_fuel_amount_follows_fuel_duration() {
    let catalog = fixture();
    let config = Configuration {
        fuel: "FAST_FUEL".to_string(),
        ..tier_two(3)
    };
    let prices = PriceBook::new(&catalog, &config);
    let mut notes = Notes::new();

    // an hour and a half of a one hour fuel on three nodes
    let cost = operating_cost(&config, &prices, 5400.0, 1.0, &mut notes);
    assert!(approx(cost.fuel_amount, 4.5), "Got {}", cost.fuel_amount);
    assert!(approx(cost.fuel_cost, 45.0));

    // emptied twice over the total time
    let cost = operating_cost(&config, &prices, 5400.0, 2.0, &mut notes);
    assert!(approx(cost.fuel_amount, 9.0), "Got {}", cost.fuel_amount);
    assert!(approx(cost.fuel_cost, 90.0));

    let no_fuel = tier_two(3);
    let cost = operating_cost(&no_fuel, &prices, 5400.0, 1.0, &mut notes);
    assert_eq!(cost.fuel_amount, 0.0, "Nothing to refuel without a limited fuel");
    assert_eq!(cost.fuel_cost, 0.0);
}
