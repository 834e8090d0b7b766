//! Add-ons: post-processors that run after a completed calculation.
//!
//! Add-ons never run inside the pipeline. They receive the finished
//! [`Outcome`] and may start fresh calculations of their own on the same
//! [`Calculator`], which is free again by the time they run.

use std::cmp::Ordering;

use crate::calculator::Calculator;
use crate::catalog::Catalog;
use crate::display::reduced_number;
use crate::economy::PriceBook;
use crate::error::CalcError;
use crate::models::{Configuration, Notes, Outcome};
use crate::rates::{Overrides, INFERNO_FUEL};
use crate::upgrades::{CORRUPT_SOIL, HYPERGOLIC_GRADE};
use crate::yields::MOB_NODES;

const SUPER_COMPACTOR: &str = "SUPER_COMPACTOR_3000";
const DWARVEN_SUPER_COMPACTOR: &str = "DWARVEN_SUPER_COMPACTOR";
/// Nodes whose drops the Dwarven Super Compactor smelts.
const SMELTING_NODES: [&str; 3] = ["Iron", "Gold", "Cactus"];
const INFERNO_VERTEX: &str = "INFERNO_VERTEX";
/// Rare Inferno drops left out of the bad luck profit.
const RARE_INFERNO_DROPS: [&str; 4] = [
    "INFERNO_APEX",
    "REAPER_PEPPER",
    INFERNO_VERTEX,
    "GABAGOOL_THE_FISH",
];
/// Setups costing this much or more are left out of the Inferno loop.
const INFERNO_COST_FILTER: f64 = 6_000_000_000.0;
const LOOP_RESULTS: usize = 10;

/// State shared by the add-ons of one run.
#[derive(Debug)]
pub struct AddonContext<'a> {
    pub calculator: &'a Calculator,
    pub config: Configuration,
    pub outcome: Outcome,
    outputs: Vec<(String, String)>,
}

impl<'a> AddonContext<'a> {
    pub fn new(calculator: &'a Calculator, config: Configuration, outcome: Outcome) -> Self {
        Self {
            calculator,
            config,
            outcome,
            outputs: Vec::new(),
        }
    }

    /// Records one named output line.
    pub fn output(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.outputs.push((name.into(), text.into()));
    }

    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    pub fn into_parts(self) -> (Configuration, Outcome, Vec<(String, String)>) {
        (self.config, self.outcome, self.outputs)
    }
}

/// A post-processor over a completed calculation.
pub trait Addon {
    fn name(&self) -> &'static str;

    /// Runs the add-on; may replace the context's outcome.
    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError>;
}

/// Days until the setup's profit pays back its cost.
pub struct RepayTime;

impl Addon for RepayTime {
    fn name(&self) -> &'static str {
        "Days to Repay Setup"
    }

    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError> {
        let text = match repay_days(&context.outcome) {
            Some(days) => format!("{} Days", days),
            None => "Division by zero".to_string(),
        };
        context.output("Setup Repay Time", text);
        Ok(())
    }
}

/// Repay time in days rounded to 2 decimals, `None` when profit or time is zero.
pub fn repay_days(outcome: &Outcome) -> Option<f64> {
    if outcome.total_seconds == 0.0 || outcome.total_profit == 0.0 {
        return None;
    }
    let per_second = outcome.total_profit / outcome.total_seconds;
    let days = outcome.setup_cost / per_second / 86400.0;
    Some((days * 100.0).round() / 100.0)
}

/// Inferno profit without the rare drops, plus the value of one vertex.
pub struct BadLuckInferno;

impl Addon for BadLuckInferno {
    fn name(&self) -> &'static str {
        "Bad Luck Inferno"
    }

    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError> {
        match bad_luck_profit(&context.config, &context.outcome) {
            Ok(profit) => {
                let per_vertex = vertex_price(context.calculator, &context.config);
                context.output(
                    "Bad Luck Inferno Profit",
                    format!(
                        "{} + {} per Inferno Vertex",
                        reduced_number(profit, 2),
                        reduced_number(per_vertex, 2)
                    ),
                );
            }
            Err(reason) => context.output(self.name(), reason),
        }
        Ok(())
    }
}

/// Total profit minus the rare Hypergolic drops.
///
/// # Errors
///
/// Returns the reason when the setup has no Hypergolic Inferno fuel.
pub fn bad_luck_profit(config: &Configuration, outcome: &Outcome) -> Result<f64, &'static str> {
    if config.fuel != INFERNO_FUEL {
        return Err("No Inferno Minion Fuel Found");
    }
    if config.inferno_grade != HYPERGOLIC_GRADE {
        return Err("No Hypergolic Items Found");
    }
    let rare: f64 = RARE_INFERNO_DROPS
        .iter()
        .filter_map(|id| outcome.item_profits.get(*id))
        .sum();
    Ok(outcome.total_profit - rare)
}

fn vertex_price(calculator: &Calculator, config: &Configuration) -> f64 {
    let prices = PriceBook::new(calculator.catalog(), config);
    prices.bazaar_sell(INFERNO_VERTEX, &mut Notes::new())
}

/// Recalculates with the Rising Celsius bonus forced to its maximum.
pub struct RisingCelsiusOverride;

impl Addon for RisingCelsiusOverride {
    fn name(&self) -> &'static str {
        "Rising Celsius Override"
    }

    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError> {
        context.outcome = context.calculator.calculate_with(
            &context.config,
            Overrides {
                rising_celsius: true,
            },
        )?;
        context.output(self.name(), "Forced Rising Celsius boost to max");
        Ok(())
    }
}

/// Calculates the current setup on every node and lists the most profitable.
pub struct BasicNodeLoop;

impl Addon for BasicNodeLoop {
    fn name(&self) -> &'static str {
        "Basic Minion Loop"
    }

    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError> {
        let mut config = context.config.clone();
        let is_super = |id: &str| id == SUPER_COMPACTOR || id == DWARVEN_SUPER_COMPACTOR;
        let super_compacting = is_super(&config.upgrade1) || is_super(&config.upgrade2);
        if is_super(&config.upgrade2) {
            config.upgrade2 = std::mem::replace(&mut config.upgrade1, SUPER_COMPACTOR.to_string());
        }
        let corrupting = config.upgrade_slots().contains(&CORRUPT_SOIL);

        let calculator = context.calculator;
        let catalog = calculator.catalog();
        let mut results = Vec::new();
        for node in catalog.node_names() {
            if corrupting && !MOB_NODES.contains(&node.as_str()) {
                continue;
            }
            if super_compacting {
                config.upgrade1 = loop_compactor(&node, catalog).to_string();
            }
            let max_tier = catalog.tiers(&node).last().copied().unwrap_or(1);
            config.tier = context.config.tier.min(max_tier);
            config.node = node;
            let outcome = calculator.calculate(&config)?;
            results.push((config.node.clone(), outcome.total_profit, outcome.setup_cost));
        }
        sort_descending(&mut results, |r| r.1);

        let mut lines = vec!["Minion : profit , setup cost".to_string()];
        lines.extend(results.iter().take(LOOP_RESULTS).map(|(node, profit, cost)| {
            format!(
                "{} : {} , {}",
                node,
                reduced_number(*profit, 2),
                reduced_number(*cost, 2)
            )
        }));
        context.output(self.name(), lines.join("\n"));
        Ok(())
    }
}

/// Super compactor the node loop installs on `node`.
///
/// Smelting nodes take the Dwarven Super Compactor when the catalog offers
/// it.
pub fn loop_compactor(node: &str, catalog: &Catalog) -> &'static str {
    let offered = catalog.upgrades.iter().any(|u| u == DWARVEN_SUPER_COMPACTOR);
    if offered && SMELTING_NODES.contains(&node) {
        DWARVEN_SUPER_COMPACTOR
    } else {
        SUPER_COMPACTOR
    }
}

/// Searches Inferno tiers and counts for the best bad luck profit.
pub struct InfernoLoop;

impl Addon for InfernoLoop {
    fn name(&self) -> &'static str {
        "Inferno Minion Loop"
    }

    fn run(&self, context: &mut AddonContext<'_>) -> Result<(), CalcError> {
        let mut config = context.config.clone();
        config.node = "Inferno".to_string();
        config.fuel = INFERNO_FUEL.to_string();
        config.chest = "XXLARGE_STORAGE".to_string();
        let overrides = Overrides {
            rising_celsius: true,
        };

        let tiers = context.calculator.catalog().tiers(&config.node);
        let mut results = Vec::new();
        for tier in tiers {
            config.tier = tier;
            for amount in 1..=31 {
                config.amount = amount;
                let outcome = context.calculator.calculate_with(&config, overrides)?;
                let Ok(bad_luck) = bad_luck_profit(&config, &outcome) else {
                    context.output(self.name(), "No Hypergolic Items Found");
                    return Ok(());
                };
                let mut cost = outcome.setup_cost;
                if config.free_will {
                    cost += outcome.free_will_cost;
                }
                if cost < INFERNO_COST_FILTER {
                    results.push((tier, amount, bad_luck, cost, outcome.total_profit));
                }
            }
        }
        sort_descending(&mut results, |r| r.2);

        let mut lines =
            vec!["Tier, Amount : bad luck profit , minion cost, true average profit".to_string()];
        lines.extend(results.iter().take(LOOP_RESULTS).map(
            |(tier, amount, bad_luck, cost, profit)| {
                format!(
                    "{}, {} : {} , {} , {}",
                    tier,
                    amount,
                    reduced_number(*bad_luck, 2),
                    reduced_number(*cost, 2),
                    reduced_number(*profit, 2)
                )
            },
        ));
        lines.push(format!(
            "Bad Luck Profit: + {} per Inferno Vertex",
            reduced_number(vertex_price(context.calculator, &config), 2)
        ));
        context.output(self.name(), lines.join("\n"));
        Ok(())
    }
}

/// Stable sort, highest key first; equal keys keep their order.
fn sort_descending<T>(results: &mut [T], key: impl Fn(&T) -> f64) {
    results.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

/// Every built-in add-on, in menu order.
pub fn builtin() -> Vec<Box<dyn Addon>> {
    vec![
        Box::new(RepayTime),
        Box::new(BasicNodeLoop),
        Box::new(BadLuckInferno),
        Box::new(RisingCelsiusOverride),
        Box::new(InfernoLoop),
    ]
}

/// Looks a built-in add-on up by name, ignoring case.
pub fn find(name: &str) -> Option<Box<dyn Addon>> {
    builtin()
        .into_iter()
        .find(|addon| addon.name().eq_ignore_ascii_case(name))
}

/// Runs add-ons in order over a completed calculation.
///
/// Each add-on sees the outcome left by the previous one. Unknown names are
/// skipped with a warning.
pub fn run_addons<'a>(
    calculator: &'a Calculator,
    config: Configuration,
    outcome: Outcome,
    names: &[String],
) -> Result<AddonContext<'a>, CalcError> {
    let mut context = AddonContext::new(calculator, config, outcome);
    for name in names {
        match find(name) {
            Some(addon) => {
                tracing::debug!(addon = addon.name(), "running add-on");
                addon.run(&mut context)?;
            }
            None => tracing::warn!(addon = %name, "unknown add-on"),
        }
    }
    Ok(context)
}
