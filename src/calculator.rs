//! The calculation pipeline and the calculator that runs it.
//!
//! [`run`] is the whole engine: a pure function from a configuration and a
//! catalog snapshot to an [`Outcome`]. Stages run strictly in order:
//! rates, yields, upgrade effects, compaction, storage, economy, pets and
//! costs. [`Calculator`] owns the catalog and rejects overlapping runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::catalog::Catalog;
use crate::codec;
use crate::compaction;
use crate::costs;
use crate::economy::{self, PriceBook};
use crate::error::CalcError;
use crate::models::{Configuration, Notes, Outcome};
use crate::pets;
use crate::rates::{self, Overrides, INFERNO_FUEL};
use crate::storage;
use crate::upgrades;
use crate::yields;

/// Runs the full pipeline for one configuration.
///
/// Recoverable problems (unknown items, missing prices, the compaction
/// bound) never abort the run; they end up in [`Outcome::notes`].
///
/// # Example
///
/// ```
/// use minion_calc::calculator::run;
/// use minion_calc::data::embedded_catalog;
/// use minion_calc::models::Configuration;
/// use minion_calc::rates::Overrides;
///
/// let catalog = embedded_catalog().unwrap();
/// let outcome = run(&Configuration::default(), &catalog, Overrides::default());
/// assert!(outcome.items["COBBLESTONE"] > 0.0);
/// ```
pub fn run(config: &Configuration, catalog: &Catalog, overrides: Overrides) -> Outcome {
    let mut notes = Notes::new();

    let rates = rates::resolve(config, catalog, overrides, &mut notes);
    let mut production = yields::simulate(config, catalog, &rates, &mut notes);
    let ratio = production.time_ratio;

    let mut prices = PriceBook::new(catalog, config);
    let effects = upgrades::apply(config, catalog, &prices, &mut production, &mut notes);
    if let Some(price) = effects.inferno_fuel_price {
        prices.set_custom(INFERNO_FUEL, price);
    }

    let compactions = compaction::compact(
        &mut production.ledger,
        catalog,
        effects.compact,
        effects.super_compact,
        &mut notes,
    );

    let storage = storage::account(
        &production.ledger,
        config,
        catalog,
        production.window_seconds,
        &mut notes,
    );
    storage::scale_by_count(&mut production.ledger, config.amount);

    let sales = economy::sell_all(&production.ledger, config, &prices, &mut notes);
    let xp = economy::experience(&production.ledger, config, catalog);
    compaction::over_compacted(&compactions, config.sell_location, &prices, &mut notes);

    let pets = pets::level(&xp, config, &prices, ratio, &mut notes);
    let operating = costs::operating_cost(
        config,
        &prices,
        production.window_seconds,
        ratio,
        &mut notes,
    );
    let setup = costs::estimate(config, &production.upgrades, &prices, &mut notes);

    let item_profit = sales.total * ratio;
    let setup_id = match codec::encode(config, catalog) {
        Ok(id) => id,
        Err(error) => {
            notes.warn(format!("Could not build setup ID: {error}"));
            String::new()
        }
    };
    if let Some(node) = catalog.node(&config.node) {
        notes.extend(&node.notes);
    }

    tracing::info!(
        node = %config.node,
        tier = config.tier,
        profit = item_profit + pets.profit - operating.fuel_cost,
        "calculation finished"
    );
    Outcome {
        setup_id,
        action_time: production.seconds_per_action,
        harvests: production.total_harvests,
        window_seconds: production.window_seconds,
        total_seconds: production.window_seconds * ratio,
        items: scaled(production.ledger, ratio),
        sell_locations: sales.venues,
        item_profits: scaled(sales.item_profits, ratio),
        item_profit,
        xp: scaled(xp, ratio),
        pets: pets.pets,
        pet_profit: pets.profit,
        fuel_cost: operating.fuel_cost,
        fuel_amount: operating.fuel_amount,
        total_profit: item_profit + pets.profit - operating.fuel_cost,
        fill_time: storage.fill_time,
        used_storage: storage.used_slots,
        available_storage: storage.available,
        setup_cost: setup.total,
        free_will_cost: setup.free_will_cost,
        optimal_free_will_tier: setup.optimal_free_will_tier,
        extra_cost: setup.extra_cost,
        notes,
    }
}

fn scaled<K: Ord>(map: BTreeMap<K, f64>, ratio: f64) -> BTreeMap<K, f64> {
    map.into_iter()
        .map(|(key, value)| (key, value * ratio))
        .collect()
}

/// Marks a calculator as busy until dropped.
#[derive(Debug)]
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns a catalog snapshot and runs calculations against it.
///
/// Replacing the catalog needs `&mut self`, so a price refresh can never
/// interleave with a running calculation. Overlapping calculations through a
/// shared reference are rejected with [`CalcError::Busy`].
#[derive(Debug)]
pub struct Calculator {
    catalog: Catalog,
    in_flight: AtomicBool,
}

impl Calculator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swaps in a new catalog snapshot.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Reserves the calculator until the returned token is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Busy`] when another reservation is alive.
    pub fn begin(&self) -> Result<InFlight<'_>, CalcError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CalcError::Busy)?;
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    pub fn calculate(&self, config: &Configuration) -> Result<Outcome, CalcError> {
        self.calculate_with(config, Overrides::default())
    }

    /// Runs one calculation with engine overrides.
    pub fn calculate_with(
        &self,
        config: &Configuration,
        overrides: Overrides,
    ) -> Result<Outcome, CalcError> {
        let _token = self.begin()?;
        Ok(run(config, &self.catalog, overrides))
    }

    /// Applies a setup ID on top of `base` and calculates it.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Codec`] for an invalid ID.
    pub fn calculate_id(
        &self,
        id: &str,
        base: &Configuration,
    ) -> Result<(Configuration, Outcome), CalcError> {
        let delta = codec::try_decode(id, &self.catalog)?;
        let mut config = base.clone();
        delta.apply(&mut config);
        let outcome = self.calculate(&config)?;
        Ok((config, outcome))
    }
}
