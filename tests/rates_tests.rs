//! Tests for action speed and drop multipliers.

mod common;

use common::{approx, fixture, test_config};
use minion_calc::models::{Configuration, Mayor, Notes, WARNING_KEY};
use minion_calc::rates::{drop_multiplier, resolve, speed_bonus, Overrides};

fn boosted(afk: bool) -> Configuration {
    Configuration {
        upgrade1: "BOOST_A".to_string(),
        upgrade2: "BOOST_B".to_string(),
        afk,
        ..test_config()
    }
}

#[test]
fn test_attended_drop_multiplier_is_floored_per_slot() {
    let catalog = fixture();
    let mut notes = Notes::new();

    // 1.5 floors to 1 after each slot
    let multiplier = drop_multiplier(&boosted(true), &catalog, &mut notes);
    assert_eq!(multiplier, 1.0, "Two 1.5x upgrades should give 1x while attended");
}

#[test]
fn test_unattended_drop_multiplier_compounds() {
    let catalog = fixture();
    let mut notes = Notes::new();

    let multiplier = drop_multiplier(&boosted(false), &catalog, &mut notes);
    assert!(approx(multiplier, 2.25), "Expected 2.25x, got {}", multiplier);

    // the Enchanted Clock keeps offline behaviour
    let clocked = Configuration {
        enchanted_clock: true,
        ..boosted(true)
    };
    let multiplier = drop_multiplier(&clocked, &catalog, &mut notes);
    assert!(approx(multiplier, 2.25), "Clock should not floor, got {}", multiplier);
}

#[test]
fn test_derpy_doubles_drops() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        mayor: Mayor::Derpy,
        ..test_config()
    };

    assert_eq!(drop_multiplier(&config, &catalog, &mut notes), 2.0);
}

#[test]
fn test_fuel_speed_shortens_actions() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        fuel: "FAST_FUEL".to_string(),
        ..test_config()
    };

    let rates = resolve(&config, &catalog, Overrides::default(), &mut notes);
    assert_eq!(rates.speed_bonus, 100.0);
    assert!(approx(rates.seconds_per_action, 5.0), "10s at +100% should be 5s");
}

#[test]
fn test_flat_speed_bonuses_add_up() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        beacon: 2,
        scorched: true,
        infusion: true,
        free_will: true,
        postcard: true,
        ..test_config()
    };

    // 2% per beacon level, 1 for scorched, 10 + 10 + 5 for the rest
    let bonus = speed_bonus(&config, &catalog, Overrides::default(), &mut notes);
    assert_eq!(bonus, 30.0);
}

#[test]
fn test_rising_celsius_scales_with_count() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        node: "Inferno".to_string(),
        amount: 3,
        ..test_config()
    };

    let normal = speed_bonus(&config, &catalog, Overrides::default(), &mut notes);
    assert_eq!(normal, 54.0, "18% per Inferno node");

    let forced = speed_bonus(
        &config,
        &catalog,
        Overrides {
            rising_celsius: true,
        },
        &mut notes,
    );
    assert_eq!(forced, 180.0, "The override forces the maximum");
}

#[test]
fn test_missing_tier_is_a_warning() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        tier: 9,
        ..test_config()
    };

    let rates = resolve(&config, &catalog, Overrides::default(), &mut notes);
    assert_eq!(rates.seconds_per_action, 0.0);
    let warning = notes.get(WARNING_KEY).unwrap_or_default();
    assert!(warning.contains("has no tier 9"), "Unexpected warning: {}", warning);
}

#[test]
fn test_unknown_upgrade_is_neutral() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        upgrade1: "MYSTERY".to_string(),
        ..test_config()
    };

    let rates = resolve(&config, &catalog, Overrides::default(), &mut notes);
    assert_eq!(rates.speed_bonus, 0.0);
    assert_eq!(rates.drop_multiplier, 1.0);
    assert!(notes.contains(WARNING_KEY), "Unknown upgrades should be reported");
}
