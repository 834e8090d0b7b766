//! Minion Calc - Command Line Interface
//!
//! This is the main entry point for the minion calculator.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use minion_calc::{
    addons::run_addons,
    bazaar::{BazaarSnapshot, Refresher},
    calculator::Calculator,
    codec,
    data::{embedded_catalog, load_catalog},
    display::{display_addon_outputs, display_outcome},
    models::{Configuration, OptionSet, SellLocation, TimeSpan, TimeUnit},
    rates::Overrides,
    templates::Template,
};

/// Command-line arguments for Minion Calc.
#[derive(Parser, Debug)]
#[command(name = "minion-calc")]
#[command(author, version, about = "Calculate the profit of Hypixel Skyblock minion setups", long_about = None)]
struct Args {
    /// Directory holding items.csv and catalog.json (embedded data if absent)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Configuration JSON file; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Setup template applied on top of the configuration
    #[arg(short, long)]
    template: Option<String>,

    /// Setup ID applied after the template
    #[arg(long)]
    id: Option<String>,

    /// Bazaar snapshot JSON file to refresh prices from
    #[arg(long)]
    bazaar: Option<PathBuf>,

    /// Add-on to run after the calculation (repeatable)
    #[arg(long = "addon")]
    addons: Vec<String>,

    /// Force the Rising Celsius boost to its maximum
    #[arg(long, default_value = "false")]
    rising_celsius: bool,

    /// Print the outcome as JSON instead of a report
    #[arg(long, default_value = "false")]
    json: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    // ========== Setup overrides ==========
    /// Minion type
    #[arg(short, long)]
    node: Option<String>,

    /// Minion tier
    #[arg(long)]
    tier: Option<u32>,

    /// Number of minions
    #[arg(short, long)]
    amount: Option<u32>,

    /// Fuel item ID
    #[arg(long)]
    fuel: Option<String>,

    /// First upgrade item ID
    #[arg(long)]
    upgrade1: Option<String>,

    /// Second upgrade item ID
    #[arg(long)]
    upgrade2: Option<String>,

    /// Player stays AFK on the island
    #[arg(long, default_value = "false")]
    afk: bool,

    /// Enchanted Clock is active
    #[arg(long, default_value = "false")]
    clock: bool,

    /// Length of the time window
    #[arg(long)]
    time: Option<f64>,

    /// Unit of the time window (Years, Weeks, Days, Hours, Minutes, Seconds, Harvests)
    #[arg(long, default_value = "Days")]
    unit: String,

    /// Where to sell (Best, Bazaar, Hopper, NPC)
    #[arg(long)]
    sell: Option<String>,
}

fn option<T: OptionSet>(kind: &str, label: &str) -> Result<T, Box<dyn Error>> {
    T::options()
        .iter()
        .copied()
        .find(|o| o.label().eq_ignore_ascii_case(label) || o.label().starts_with(label))
        .ok_or_else(|| format!("unknown {}: {}", kind, label).into())
}

fn build_config(args: &Args, calculator: &Calculator) -> Result<Configuration, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Configuration::default(),
    };

    if let Some(name) = &args.template {
        let template: Template = name.parse()?;
        template.apply(&mut config);
    }
    if let Some(id) = &args.id {
        codec::try_decode(id, calculator.catalog())?.apply(&mut config);
    }

    if let Some(node) = &args.node {
        config.node = node.clone();
    }
    if let Some(tier) = args.tier {
        config.tier = tier;
    }
    if let Some(amount) = args.amount {
        config.amount = amount;
    }
    if let Some(fuel) = &args.fuel {
        config.fuel = fuel.clone();
    }
    if let Some(upgrade) = &args.upgrade1 {
        config.upgrade1 = upgrade.clone();
    }
    if let Some(upgrade) = &args.upgrade2 {
        config.upgrade2 = upgrade.clone();
    }
    config.afk |= args.afk;
    config.enchanted_clock |= args.clock;
    if let Some(time) = args.time {
        config.total_time = TimeSpan::new(time, option::<TimeUnit>("time unit", &args.unit)?);
    }
    if let Some(sell) = &args.sell {
        config.sell_location = option::<SellLocation>("sell location", sell)?;
    }
    Ok(config)
}

fn load(data_dir: Option<&Path>) -> Result<Calculator, Box<dyn Error>> {
    let catalog = match data_dir {
        Some(dir) => load_catalog(dir)?,
        None if Path::new("data").exists() => load_catalog(Path::new("data"))?,
        None => embedded_catalog()?,
    };
    Ok(Calculator::new(catalog))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let mut calculator = load(args.data_dir.as_deref())?;

    if let Some(path) = &args.bazaar {
        let snapshot = BazaarSnapshot::from_json(&std::fs::read_to_string(path)?)?;
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Refresher::new().refresh(&mut calculator, &snapshot, now_ms, true)?;
    }

    let config = build_config(&args, &calculator)?;
    if calculator.catalog().node(&config.node).is_none() {
        println!();
        println!("[WARNING] Unknown minion type: {}", config.node);
        println!("Known types: {}", calculator.catalog().node_names().join(", "));
        return Ok(());
    }

    let overrides = Overrides {
        rising_celsius: args.rising_celsius,
    };
    let outcome = calculator.calculate_with(&config, overrides)?;
    let context = run_addons(&calculator, config, outcome, &args.addons)?;
    let (config, outcome, outputs) = context.into_parts();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Minion Calc - Hypixel Skyblock Minion Calculator");
    println!("================================================================");
    display_outcome(&config, &outcome, calculator.catalog());
    display_addon_outputs(&outputs);

    Ok(())
}
