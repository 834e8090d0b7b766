//! Bazaar price refresh from an order book snapshot.
//!
//! The snapshot has the shape of the public bazaar endpoint. Fetching it is
//! left to the host; this module only turns it into a new catalog snapshot.
//!
//! For each side of an item's order book the price is the volume weighted
//! average of the best 10% of the volume. When the best order is 2.5 times
//! that average or more, the book is bottom heavy and the best order price
//! is used instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::catalog::Catalog;
use crate::error::CatalogError;

/// Share of an order book's volume that is averaged.
pub const TOP_SHARE: f64 = 0.1;
/// Best order to average ratio from which the best order price is used.
pub const BOTTOM_HEAVY_RATIO: f64 = 2.5;
/// Minimum time between two refreshes, in milliseconds.
pub const REFRESH_COOLDOWN_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub amount: f64,
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: f64,
}

/// Both sides of one product's order book, best order first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Sell offers, which a buyer fills instantly.
    pub buy_summary: Vec<Order>,
    /// Buy orders, which a seller fills instantly.
    pub sell_summary: Vec<Order>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BazaarSnapshot {
    pub success: bool,
    #[serde(rename = "lastUpdated")]
    pub last_updated: u64,
    pub products: BTreeMap<String, Product>,
}

impl BazaarSnapshot {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Price of one side of an order book.
///
/// # Example
///
/// ```
/// use minion_calc::bazaar::{side_price, Order};
///
/// let orders = [
///     Order { amount: 5.0, price_per_unit: 10.0 },
///     Order { amount: 95.0, price_per_unit: 8.0 },
/// ];
/// // the best 10 items: 5 at 10 and 5 at 8
/// assert_eq!(side_price(&orders), 9.0);
/// assert_eq!(side_price(&[]), 0.0);
/// ```
pub fn side_price(orders: &[Order]) -> f64 {
    let top_amount = TOP_SHARE * orders.iter().map(|o| o.amount).sum::<f64>();
    if top_amount == 0.0 {
        return 0.0;
    }
    let mut remaining = top_amount;
    let mut top_sum = 0.0;
    for order in orders {
        if remaining <= 0.0 {
            break;
        }
        let taken = remaining.min(order.amount);
        top_sum += taken * order.price_per_unit;
        remaining -= taken;
    }
    let average = top_sum / top_amount;
    let best = orders[0].price_per_unit;
    if best / average >= BOTTOM_HEAVY_RATIO {
        tracing::debug!(best, average, "bottom heavy order book, using the best order");
        best
    } else {
        average
    }
}

/// Builds a new catalog with bazaar prices taken from the snapshot.
///
/// Items missing from the snapshot keep their prices.
///
/// # Errors
///
/// Returns [`CatalogError::UnsuccessfulSnapshot`] when the snapshot reports
/// a failed call.
pub fn apply(catalog: &Catalog, snapshot: &BazaarSnapshot) -> Result<Catalog, CatalogError> {
    if !snapshot.success {
        return Err(CatalogError::UnsuccessfulSnapshot);
    }
    let mut refreshed = catalog.clone();
    let mut updated = 0;
    for (id, item) in refreshed.items.iter_mut() {
        let Some(product) = snapshot.products.get(id) else {
            continue;
        };
        for (orders, price) in [
            (&product.buy_summary, &mut item.prices.buy_price),
            (&product.sell_summary, &mut item.prices.sell_price),
        ] {
            *price = Some(side_price(orders));
        }
        updated += 1;
    }
    tracing::info!(updated, last_updated = snapshot.last_updated, "bazaar prices applied");
    Ok(refreshed)
}

/// Rate limits catalog refreshes.
#[derive(Debug, Clone, Default)]
pub struct Refresher {
    last_refresh_ms: Option<u64>,
}

impl Refresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the calculator's catalog with refreshed prices.
    ///
    /// Within [`REFRESH_COOLDOWN_MS`] of the previous refresh nothing happens
    /// unless `force` is set. Returns whether the catalog was replaced.
    pub fn refresh(
        &mut self,
        calculator: &mut Calculator,
        snapshot: &BazaarSnapshot,
        now_ms: u64,
        force: bool,
    ) -> Result<bool, CatalogError> {
        if let Some(last) = self.last_refresh_ms {
            if !force && now_ms.saturating_sub(last) < REFRESH_COOLDOWN_MS {
                tracing::info!("bazaar refresh is on cooldown");
                return Ok(false);
            }
        }
        let catalog = apply(calculator.catalog(), snapshot)?;
        calculator.set_catalog(catalog);
        self.last_refresh_ms = Some(now_ms);
        Ok(true)
    }
}
