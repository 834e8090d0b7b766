//! Data loading functionality for the minion calculator.
//!
//! The catalog is stored as two files in a data directory:
//!
//! - `items.csv`: one row per item with display name, prices, experience and
//!   consumable duration
//! - `catalog.json`: node tables, recipes, chests, hoppers, pets and the
//!   upgrade stats of every fuel and upgrade (under `upgrade_stats`)
//!
//! Both files are also compiled into the crate so the wasm build and tests
//! can run without a data directory.

use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::catalog::{Catalog, ItemEntry, Prices, UpgradeStats, XpYield};
use crate::error::CatalogError;
use crate::models::ItemRow;

/// Item table shipped with the crate.
pub const EMBEDDED_ITEMS: &str = include_str!("../data/items.csv");
/// Catalog tables shipped with the crate.
pub const EMBEDDED_TABLES: &str = include_str!("../data/catalog.json");

/// Upgrade stats live next to the other tables but attach to items.
#[derive(Debug, Default, Deserialize)]
struct UpgradeTable {
    #[serde(default)]
    upgrade_stats: BTreeMap<String, UpgradeStats>,
}

/// Parses the item table from any reader.
///
/// # CSV Format
///
/// Expected columns: `id, display, npc, buy_price, sell_price, custom, xp_skill, xp_amount, duration`.
/// Empty cells are missing values.
pub fn parse_items<R: Read>(reader: R) -> Result<BTreeMap<String, ItemEntry>, CatalogError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut items = BTreeMap::new();
    for result in rdr.deserialize() {
        let row: ItemRow = result?;
        let xp = match (row.xp_skill, row.xp_amount) {
            (Some(skill), Some(amount)) if amount != 0.0 => Some(XpYield { skill, amount }),
            _ => None,
        };
        items.insert(
            row.id,
            ItemEntry {
                display: row.display,
                prices: Prices {
                    npc: row.npc,
                    buy_price: row.buy_price,
                    sell_price: row.sell_price,
                    custom: row.custom,
                },
                xp,
                upgrade: None,
                duration: row.duration,
            },
        );
    }
    Ok(items)
}

/// Loads the item table from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the items CSV file
///
/// # Returns
///
/// Every item keyed by its ID, or an error if the file cannot be read or
/// parsed.
pub fn load_items(path: &Path) -> Result<BTreeMap<String, ItemEntry>, CatalogError> {
    let file = fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_items(file)
}

/// Combines an item table and the JSON tables into one [`Catalog`].
///
/// Upgrade stats for IDs missing from the item table create a bare entry
/// named after the ID, so a fuel or upgrade is never silently neutral.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] for malformed tables and
/// [`CatalogError::Empty`] when no node is defined.
pub fn assemble(
    items: BTreeMap<String, ItemEntry>,
    tables: &str,
) -> Result<Catalog, CatalogError> {
    let mut catalog: Catalog = serde_json::from_str(tables)?;
    let upgrades: UpgradeTable = serde_json::from_str(tables)?;
    if catalog.nodes.is_empty() {
        return Err(CatalogError::Empty);
    }

    catalog.items = items;
    for (id, stats) in upgrades.upgrade_stats {
        let entry = catalog.items.entry(id.clone()).or_insert_with(|| {
            tracing::warn!(item = %id, "upgrade stats for an item missing from the item table");
            ItemEntry {
                display: id.clone(),
                ..ItemEntry::default()
            }
        });
        entry.upgrade = Some(stats);
    }

    tracing::debug!(
        items = catalog.items.len(),
        nodes = catalog.nodes.len(),
        "catalog assembled"
    );
    Ok(catalog)
}

/// Loads a catalog from `items.csv` and `catalog.json` in `data_dir`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use minion_calc::data::load_catalog;
///
/// let catalog = load_catalog(Path::new("data")).unwrap();
/// println!("{} nodes", catalog.nodes.len());
/// ```
pub fn load_catalog(data_dir: &Path) -> Result<Catalog, CatalogError> {
    let items = load_items(&data_dir.join("items.csv"))?;
    let tables_path = data_dir.join("catalog.json");
    let tables = fs::read_to_string(&tables_path).map_err(|source| CatalogError::Io {
        path: tables_path.display().to_string(),
        source,
    })?;
    assemble(items, &tables)
}

/// The catalog compiled into the crate.
pub fn embedded_catalog() -> Result<Catalog, CatalogError> {
    let items = parse_items(EMBEDDED_ITEMS.as_bytes())?;
    assemble(items, EMBEDDED_TABLES)
}
