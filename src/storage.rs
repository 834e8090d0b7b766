//! Storage usage of a node.

use crate::catalog::Catalog;
use crate::models::{Configuration, Notes};
use crate::yields::Ledger;

/// Items per storage slot, regardless of the item's own stack size.
pub const STACK_SIZE: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Storage {
    /// Slots of the node plus its chest.
    pub available: u32,
    /// Whole slots occupied after one window.
    pub used_slots: u64,
    /// Seconds until storage is full; `None` when nothing is stored.
    pub fill_time: Option<f64>,
}

/// Measures the storage one node needs for its ledger.
///
/// The fill time assumes items arrive at a constant rate, so it is only an
/// estimate with compactors or several drops.
pub fn account(
    ledger: &Ledger,
    config: &Configuration,
    catalog: &Catalog,
    window_seconds: f64,
    notes: &mut Notes,
) -> Storage {
    let chest = catalog.chests.get(&config.chest).copied().unwrap_or_else(|| {
        notes.warn(format!("{} is not a storage chest", config.chest));
        0
    });
    let node = catalog
        .node(&config.node)
        .and_then(|n| n.storage.get(&config.tier))
        .or_else(|| catalog.standard_storage.get(&config.tier))
        .copied()
        .unwrap_or(0);
    let available = chest + node;

    let continuous: f64 = ledger.values().map(|amount| amount / STACK_SIZE).sum();
    let used_slots: u64 = ledger
        .values()
        .map(|amount| (amount / STACK_SIZE).ceil() as u64)
        .sum();
    let fill_time = if continuous > 0.0 {
        Some(window_seconds * available as f64 / continuous)
    } else {
        notes.note("Storage", "Nothing is stored, storage never fills up");
        None
    };

    Storage {
        available,
        used_slots,
        fill_time,
    }
}

/// Scales every quantity by the node count.
pub fn scale_by_count(ledger: &mut Ledger, amount: u32) {
    for quantity in ledger.values_mut() {
        *quantity *= amount as f64;
    }
}
