//! Tests for storage use and fill time.

mod common;

use common::{approx, fixture, test_config};
use minion_calc::models::{Configuration, Notes, WARNING_KEY};
use minion_calc::storage::{account, scale_by_count};
use minion_calc::yields::Ledger;

fn ledger(entries: &[(&str, f64)]) -> Ledger {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_fill_time_and_slots() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        chest: "CHEST".to_string(),
        ..test_config()
    };

    let storage = account(&ledger(&[("A", 100.0), ("B", 28.0)]), &config, &catalog, 100.0, &mut notes);
    assert_eq!(storage.available, 4, "3 chest slots plus 1 node slot");
    assert_eq!(storage.used_slots, 3);
    // 128 items fill 2 slots per window
    let fill_time = storage.fill_time.unwrap_or_default();
    assert!(approx(fill_time, 200.0), "Expected 200s, got {}", fill_time);
}

#[test]
fn test_node_storage_override() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        node: "Twin".to_string(),
        ..test_config()
    };

    let storage = account(&ledger(&[("A", 1.0)]), &config, &catalog, 100.0, &mut notes);
    assert_eq!(storage.available, 5);
}

#[test]
fn test_empty_ledger_never_fills() {
    let catalog = fixture();
    let mut notes = Notes::new();

    let storage = account(&Ledger::new(), &test_config(), &catalog, 100.0, &mut notes);
    assert_eq!(storage.fill_time, None);
    assert_eq!(storage.used_slots, 0);
    assert!(notes.contains("Storage"));
}

#[test]
fn test_unknown_chest() {
    let catalog = fixture();
    let mut notes = Notes::new();
    let config = Configuration {
        chest: "BARREL".to_string(),
        ..test_config()
    };

    let storage = account(&ledger(&[("A", 1.0)]), &config, &catalog, 100.0, &mut notes);
    assert_eq!(storage.available, 1);
    assert!(notes.contains(WARNING_KEY));
}

#[test]
fn test_scale_by_count() {
    let mut items = ledger(&[("A", 1.5), ("B", 2.0)]);
    scale_by_count(&mut items, 4);
    assert_eq!(items, ledger(&[("A", 6.0), ("B", 8.0)]));
}
