//! Small catalog shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;

use minion_calc::catalog::Catalog;
use minion_calc::data::load_catalog;
use minion_calc::models::{Configuration, TimeSpan, TimeUnit};

/// Loads the fixture catalog under `tests/fixtures`.
pub fn fixture() -> Catalog {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    load_catalog(&dir).expect("Failed to load fixture catalog")
}

/// One tier 1 "Test" node over 100 seconds, no taxes.
///
/// Its single drop `A` is worth 1 at the NPC and 2 on the bazaar.
pub fn test_config() -> Configuration {
    Configuration {
        node: "Test".to_string(),
        tier: 1,
        total_time: TimeSpan::new(100.0, TimeUnit::Seconds),
        bazaar_taxes: false,
        ..Configuration::default()
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * (1.0 + a.abs().max(b.abs()))
}
