//! Tests for setup ID encoding and decoding.

use minion_calc::codec::{decode, encode, try_decode, VERSION};
use minion_calc::data::embedded_catalog;
use minion_calc::error::CodecError;
use minion_calc::models::{Configuration, Mayor, SellLocation, Wisdom};

fn sample_config() -> Configuration {
    Configuration {
        node: "Ice".to_string(),
        tier: 11,
        amount: 25,
        fuel: "ENCHANTED_LAVA_BUCKET".to_string(),
        upgrade1: "SUPER_COMPACTOR_3000".to_string(),
        upgrade2: "DIAMOND_SPREADING".to_string(),
        chest: "XXLARGE_STORAGE".to_string(),
        beacon: 4,
        afk: true,
        wisdom: Wisdom {
            mining: 83.5,
            ..Wisdom::default()
        },
        mayor: Mayor::Derpy,
        leveling_pet: "Rock".to_string(),
        taming: 50.0,
        exp_share_pets: ["Rock".to_string(), "None".to_string(), "None".to_string()],
        sell_location: SellLocation::Bazaar,
        bazaar_flipper: 2,
        ..Configuration::default()
    }
}

#[test]
fn test_round_trip() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let config = sample_config();

    let id = encode(&config, &catalog).expect("Failed to encode");
    assert!(id.starts_with(&format!("{}!", VERSION)));

    let mut decoded = Configuration::default();
    try_decode(&id, &catalog)
        .expect("Failed to decode")
        .apply(&mut decoded);
    assert_eq!(decoded, config, "Every encoded field should survive");
}

#[test]
fn test_decoded_fields() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let id = encode(&sample_config(), &catalog).expect("Failed to encode");

    let delta = decode(&id, &catalog);
    assert_eq!(delta.get("node"), Some("Ice"));
    assert_eq!(delta.get("amount"), Some("25"));
    assert_eq!(delta.get("wisdom.mining"), Some("83.5"));
    assert_eq!(delta.get("exp_share_pet1"), Some("Rock"));
    assert_eq!(delta.iter().count(), delta.len());
}

#[test]
fn test_node_is_the_first_character() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let id = encode(&Configuration::default(), &catalog).expect("Failed to encode");

    let index = catalog
        .node_names()
        .iter()
        .position(|n| n == "Cobblestone")
        .expect("Cobblestone should be a node");
    let first = id[VERSION.len() + 1..].chars().next();
    assert_eq!(first, char::from_u32(48 + index as u32));
}

#[test]
fn test_node_options_are_sorted_by_name() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let names = catalog.node_names();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "Node option indices follow name order");
    assert_eq!(catalog.hopper_ids().first().map(String::as_str), Some("BUDGET_HOPPER"));
}

#[test]
fn test_version_mismatch_gives_empty_delta() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let id = encode(&sample_config(), &catalog).expect("Failed to encode");
    let old = id.replacen(VERSION, "1.0", 1);

    assert!(decode(&old, &catalog).is_empty());
    assert!(matches!(
        try_decode(&old, &catalog),
        Err(CodecError::VersionMismatch { .. })
    ));

    // an empty delta leaves the configuration alone
    let mut config = sample_config();
    decode(&old, &catalog).apply(&mut config);
    assert_eq!(config, sample_config());
}

#[test]
fn test_invalid_ids() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let id = encode(&sample_config(), &catalog).expect("Failed to encode");

    assert_eq!(try_decode("abc", &catalog), Err(CodecError::MissingVersion));
    assert!(matches!(
        try_decode(&id[..10], &catalog),
        Err(CodecError::Truncated { .. })
    ));

    let out_of_range = format!("{}!~{}", VERSION, &id[VERSION.len() + 2..]);
    assert!(matches!(
        try_decode(&out_of_range, &catalog),
        Err(CodecError::OptionOutOfRange { field: "node", .. })
    ));
}

#[test]
fn test_unknown_value_cannot_be_encoded() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");
    let config = Configuration {
        fuel: "MYSTERY_FUEL".to_string(),
        ..Configuration::default()
    };

    assert!(matches!(
        encode(&config, &catalog),
        Err(CodecError::UnknownOption { field: "fuel", .. })
    ));
}
