//! WebAssembly bindings for the minion calculator.
//!
//! This module provides JavaScript-accessible functions. Every function takes
//! and returns JSON strings and runs against the embedded catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::addons;
use crate::bazaar::{self, BazaarSnapshot};
use crate::calculator::Calculator;
use crate::catalog::Catalog;
use crate::codec;
use crate::data::embedded_catalog;
use crate::display::{format_time, reduced_number};
use crate::error::CalcError;
use crate::models::{Configuration, Notes, Outcome};
use crate::rates::Overrides;
use crate::templates::Template;

/// JavaScript-friendly input for a calculation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsCalculateInput {
    #[serde(default)]
    pub config: Configuration,
    /// Applied on top of `config` after the template.
    #[serde(default)]
    pub setup_id: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub bazaar: Option<BazaarSnapshot>,
    #[serde(default)]
    pub rising_celsius: bool,
    #[serde(default)]
    pub addons: Vec<String>,
}

/// JavaScript-friendly add-on output.
#[derive(Debug, Clone, Serialize)]
pub struct JsAddonOutput {
    pub name: String,
    pub output: String,
}

/// JavaScript-friendly calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsCalculateResult {
    pub success: bool,
    pub error: Option<String>,
    pub config: Option<Configuration>,
    pub outcome: Option<Outcome>,
    pub total_profit_formatted: String,
    pub fill_time_formatted: String,
    pub addon_outputs: Vec<JsAddonOutput>,
}

impl JsCalculateResult {
    fn failure(error: impl Into<String>) -> Self {
        JsCalculateResult {
            success: false,
            error: Some(error.into()),
            config: None,
            outcome: None,
            total_profit_formatted: "0".to_string(),
            fill_time_formatted: String::new(),
            addon_outputs: vec![],
        }
    }
}

/// JavaScript-friendly setup ID result.
#[derive(Debug, Clone, Serialize)]
pub struct JsIdResult {
    pub success: bool,
    pub error: Option<String>,
    pub id: Option<String>,
    /// Decoded field values, by field name.
    pub fields: BTreeMap<String, String>,
}

#[cfg(target_arch = "wasm32")]
fn warn_console(notes: &Notes) {
    for (topic, message) in notes.iter() {
        web_sys::console::warn_1(&JsValue::from_str(&format!("{topic}: {message}")));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_console(_notes: &Notes) {}

fn catalog_with(bazaar: Option<&BazaarSnapshot>) -> Result<Catalog, String> {
    let catalog = embedded_catalog().map_err(|e| format!("Invalid embedded data: {}", e))?;
    match bazaar {
        Some(snapshot) => bazaar::apply(&catalog, snapshot).map_err(|e| e.to_string()),
        None => Ok(catalog),
    }
}

fn run_input(input: JsCalculateInput) -> Result<JsCalculateResult, String> {
    let calculator = Calculator::new(catalog_with(input.bazaar.as_ref())?);

    let mut config = input.config;
    if let Some(name) = &input.template {
        let template: Template = name.parse()?;
        template.apply(&mut config);
    }
    if let Some(id) = &input.setup_id {
        let delta = codec::try_decode(id, calculator.catalog()).map_err(|e| e.to_string())?;
        delta.apply(&mut config);
    }

    let overrides = Overrides {
        rising_celsius: input.rising_celsius,
    };
    let outcome = calculator
        .calculate_with(&config, overrides)
        .map_err(|e: CalcError| e.to_string())?;
    let context = addons::run_addons(&calculator, config, outcome, &input.addons)
        .map_err(|e| e.to_string())?;
    let (config, outcome, outputs) = context.into_parts();
    warn_console(&outcome.notes);

    Ok(JsCalculateResult {
        success: true,
        error: None,
        total_profit_formatted: reduced_number(outcome.total_profit, 2),
        fill_time_formatted: outcome
            .fill_time
            .map(format_time)
            .unwrap_or_else(|| "never".to_string()),
        addon_outputs: outputs
            .into_iter()
            .map(|(name, output)| JsAddonOutput { name, output })
            .collect(),
        config: Some(config),
        outcome: Some(outcome),
    })
}

/// Run one calculation.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn calculate(input_json: &str) -> String {
    let result = match serde_json::from_str::<JsCalculateInput>(input_json) {
        Ok(input) => run_input(input).unwrap_or_else(JsCalculateResult::failure),
        Err(e) => JsCalculateResult::failure(format!("Invalid input: {}", e)),
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Encode a configuration (JSON) into a setup ID.
#[wasm_bindgen]
pub fn encode_id(config_json: &str) -> String {
    let result = serde_json::from_str::<Configuration>(config_json)
        .map_err(|e| format!("Invalid input: {}", e))
        .and_then(|config| {
            let catalog = catalog_with(None)?;
            codec::encode(&config, &catalog).map_err(|e| e.to_string())
        });
    let result = match result {
        Ok(id) => JsIdResult {
            success: true,
            error: None,
            id: Some(id),
            fields: BTreeMap::new(),
        },
        Err(error) => JsIdResult {
            success: false,
            error: Some(error),
            id: None,
            fields: BTreeMap::new(),
        },
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Decode a setup ID into its field values.
#[wasm_bindgen]
pub fn decode_id(id: &str) -> String {
    let result = catalog_with(None).and_then(|catalog| {
        codec::try_decode(id, &catalog).map_err(|e| e.to_string())
    });
    let result = match result {
        Ok(delta) => JsIdResult {
            success: true,
            error: None,
            id: Some(id.to_string()),
            fields: delta
                .iter()
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect(),
        },
        Err(error) => JsIdResult {
            success: false,
            error: Some(error),
            id: None,
            fields: BTreeMap::new(),
        },
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the selectable options of the embedded catalog.
/// Returns a JSON object of option lists.
#[wasm_bindgen]
pub fn get_options() -> String {
    #[derive(Serialize)]
    struct Options {
        nodes: BTreeMap<String, Vec<u32>>,
        fuels: Vec<String>,
        upgrades: Vec<String>,
        hoppers: Vec<String>,
        chests: Vec<String>,
        crystals: Vec<String>,
        pets: Vec<String>,
        templates: Vec<&'static str>,
        addons: Vec<&'static str>,
    }

    let Ok(catalog) = catalog_with(None) else {
        return "{}".to_string();
    };
    let options = Options {
        nodes: catalog
            .node_names()
            .into_iter()
            .map(|node| {
                let tiers = catalog.tiers(&node);
                (node, tiers)
            })
            .collect(),
        fuels: catalog.fuels.clone(),
        upgrades: catalog.upgrades.clone(),
        hoppers: catalog.hopper_ids(),
        chests: catalog.chest_ids(),
        crystals: catalog.crystal_names(),
        pets: catalog.pet_names(),
        templates: Template::ALL.iter().map(|t| t.name()).collect(),
        addons: addons::builtin().iter().map(|a| a.name()).collect(),
    };
    serde_json::to_string(&options).unwrap_or_default()
}
