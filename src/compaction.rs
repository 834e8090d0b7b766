//! Compactor and super compactor cascades.
//!
//! A compactor makes one pass over the ledger. A super compactor repeats
//! passes while a freshly made item can itself be compacted, up to
//! [`MAX_PASSES`].

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Recipe};
use crate::economy::PriceBook;
use crate::models::{Notes, SellLocation};
use crate::yields::Ledger;

/// Upper bound on super compactor passes.
pub const MAX_PASSES: usize = 10;

/// Coins an item may lose per compaction before it counts as over-compacted.
pub const OVERCOMPACT_TOLERANCE: f64 = 10_000.0;

/// One compaction step that happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Compaction {
    pub source: String,
    pub target: String,
    pub per: f64,
    pub amount: f64,
}

/// Runs one pass over a snapshot of the ledger.
///
/// Returns `true` when something made by this pass has a recipe itself.
fn pass(
    ledger: &mut Ledger,
    recipes: &BTreeMap<String, Recipe>,
    log: &mut Vec<Compaction>,
) -> bool {
    let mut chained = false;
    let snapshot: Vec<(String, f64)> = ledger.iter().map(|(k, v)| (k.clone(), *v)).collect();
    for (item, amount) in snapshot {
        let Some(recipe) = recipes.get(&item) else {
            continue;
        };
        let made = (amount / recipe.per).trunc();
        if made == 0.0 {
            continue;
        }
        let left_over = amount % recipe.per;
        if left_over == 0.0 {
            ledger.remove(&item);
        } else {
            ledger.insert(item.clone(), left_over);
        }
        // target items already in the ledger, from drops or earlier passes, are kept
        *ledger.entry(recipe.makes.clone()).or_insert(0.0) += made * recipe.amount;
        log.push(Compaction {
            source: item,
            target: recipe.makes.clone(),
            per: recipe.per,
            amount: recipe.amount,
        });
        if recipes.contains_key(&recipe.makes) {
            chained = true;
        }
    }
    chained
}

/// Compacts the ledger with the installed compactors.
///
/// The compactor pass runs first. Hitting the super compactor bound is
/// recorded as a warning and leaves the ledger as it is.
pub fn compact(
    ledger: &mut Ledger,
    catalog: &Catalog,
    compactor: bool,
    super_compactor: bool,
    notes: &mut Notes,
) -> Vec<Compaction> {
    let mut log = Vec::new();
    if compactor {
        pass(ledger, &catalog.compactor, &mut log);
    }
    if super_compactor {
        let mut passes = 0;
        loop {
            if passes == MAX_PASSES {
                notes.warn("Super compactor kept finding items to compact, stopped early");
                break;
            }
            passes += 1;
            if !pass(ledger, &catalog.super_compactor, &mut log) {
                break;
            }
        }
    }
    tracing::debug!(steps = log.len(), "compaction finished");
    log
}

/// Names the source items whose compaction loses more than the tolerance on
/// the bazaar.
///
/// Only checked when items may be sold on the bazaar.
pub fn over_compacted(
    log: &[Compaction],
    location: SellLocation,
    prices: &PriceBook<'_>,
    notes: &mut Notes,
) -> Vec<String> {
    if !matches!(location, SellLocation::Best | SellLocation::Bazaar) {
        return Vec::new();
    }
    let mut names = Vec::new();
    for step in log {
        let raw = prices.bazaar_sell(&step.source, notes) * step.per;
        let compacted = prices.bazaar_sell(&step.target, notes) * step.amount;
        if raw - compacted > OVERCOMPACT_TOLERANCE {
            names.push(prices.catalog().display(&step.source).to_string());
        }
    }
    if !names.is_empty() {
        notes.note("Over-compacting", names.join(", "));
    }
    names
}
