//! # Minion Calc
//!
//! A command-line tool and library for calculating the production economics
//! of Hypixel Skyblock minions.
//!
//! Given a setup (minion type, tier and count, fuel, upgrades, storage,
//! player boosts, pets, market settings and a time window) the calculator
//! works out:
//!
//! - Items produced, after upgrade effects and compaction
//! - Their value and the best place to sell each of them
//! - Skill experience and the pet levels it buys
//! - Fuel cost, setup cost and the cheapest Free Will tier
//! - How long the storage lasts
//!
//! ## Modules
//!
//! - [`models`] - Configuration, option sets, outcome and notes
//! - [`catalog`] - The item and effect catalog
//! - [`data`] - CSV and JSON catalog loading, plus the embedded copy
//! - [`rates`] - Action speed and drop multiplier
//! - [`yields`] - Harvests and base drops over the time window
//! - [`upgrades`] - Replacing, additive, generating and periodic upgrades
//! - [`compaction`] - Compactor and Super Compactor chains
//! - [`storage`] - Storage use and time to fill
//! - [`economy`] - Prices, sell venues and experience
//! - [`pets`] - Pet leveling and experience sharing
//! - [`costs`] - Setup cost, Free Will and fuel cost
//! - [`calculator`] - The pipeline and the calculator that runs it
//! - [`codec`] - Setup ID encoding and decoding
//! - [`templates`] - Named partial setups
//! - [`bazaar`] - Bazaar price refresh
//! - [`addons`] - Post-processors over a finished calculation
//! - [`display`] - Output formatting and display utilities
//!
//! ## Example Usage
//!
//! ```
//! use minion_calc::{
//!     calculator::Calculator,
//!     data::embedded_catalog,
//!     models::{Configuration, TimeSpan, TimeUnit},
//! };
//!
//! let calculator = Calculator::new(embedded_catalog().unwrap());
//!
//! // Ten tier 11 Cobblestone minions left alone for a day
//! let config = Configuration {
//!     node: "Cobblestone".to_string(),
//!     tier: 11,
//!     amount: 10,
//!     upgrade1: "SUPER_COMPACTOR_3000".to_string(),
//!     total_time: TimeSpan::new(1.0, TimeUnit::Days),
//!     ..Configuration::default()
//! };
//!
//! let outcome = calculator.calculate(&config).unwrap();
//! assert!(outcome.total_profit > 0.0);
//! assert!(outcome.items.contains_key("ENCHANTED_COBBLESTONE"));
//! ```
//!
//! ## Attended and Unattended
//!
//! A minion behaves differently depending on whether its island is loaded:
//!
//! 1. **Unattended** (default): yields are simulated from harvests with the
//!    drop multiplier folded into the harvest count.
//!
//! 2. **Attended** (`afk` without an Enchanted Clock): every action is
//!    simulated, drop multipliers are floored per upgrade slot, and
//!    several upgrades change behaviour.

pub mod addons;
pub mod bazaar;
pub mod calculator;
pub mod catalog;
pub mod codec;
pub mod compaction;
pub mod costs;
pub mod data;
pub mod display;
pub mod economy;
pub mod error;
pub mod models;
pub mod pets;
pub mod rates;
pub mod storage;
pub mod templates;
pub mod upgrades;
pub mod wasm;
pub mod yields;
