//! Display and formatting utilities for the minion calculator.
//!
//! This module provides the number and time formatting used by every front
//! end, and the terminal report printed by the CLI.

use crate::catalog::Catalog;
use crate::models::{Configuration, Outcome, PetSlot};

const SUFFIXES: [&str; 6] = ["", "k", "M", "B", "T", "Qd"];

/// Formats a duration in seconds to a human-readable string.
///
/// # Arguments
///
/// * `seconds` - Duration in seconds
///
/// # Returns
///
/// A formatted string like "2d 1h 0m 0s", "1h 30m 45s", "15m 30s" or "45s"
///
/// # Example
///
/// ```
/// use minion_calc::display::format_time;
///
/// assert_eq!(format_time(3665.0), "1h 1m 5s");
/// assert_eq!(format_time(125.0), "2m 5s");
/// assert_eq!(format_time(45.0), "45s");
/// assert_eq!(format_time(176400.0), "2d 1h 0m 0s");
/// ```
pub fn format_time(seconds: f64) -> String {
    let days = (seconds / 86400.0).floor();
    let hours = ((seconds % 86400.0) / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;

    if days > 0.0 {
        format!("{}d {}h {}m {:.0}s", days, hours, minutes, secs)
    } else if hours > 0.0 {
        format!("{}h {}m {:.0}s", hours, minutes, secs)
    } else if minutes > 0.0 {
        format!("{}m {:.0}s", minutes, secs)
    } else {
        format!("{:.0}s", secs)
    }
}

/// Rounds a number and adds a size suffix (k, M, B, T, Qd).
///
/// Numbers below 1 in magnitude keep one significant decimal past their
/// leading zeros instead.
///
/// # Arguments
///
/// * `number` - The number to format
/// * `decimals` - Decimal places kept after reduction
///
/// # Example
///
/// ```
/// use minion_calc::display::reduced_number;
///
/// assert_eq!(reduced_number(0.0, 2), "0");
/// assert_eq!(reduced_number(1500.0, 2), "1.5k");
/// assert_eq!(reduced_number(-2_345_678.0, 2), "-2.35M");
/// assert_eq!(reduced_number(0.0456, 2), "0.046");
/// assert_eq!(reduced_number(12.0, 2), "12");
/// ```
pub fn reduced_number(number: f64, decimals: usize) -> String {
    if number == 0.0 {
        return "0".to_string();
    }
    if !number.is_finite() {
        return number.to_string();
    }
    let magnitude = number.abs().log10().floor();
    if magnitude < 0.0 {
        let places = 1 + (-magnitude) as usize;
        return trim_zeros(format!("{:.*}", places, number));
    }
    let step = ((magnitude / 3.0) as usize).min(SUFFIXES.len() - 1);
    let reduced = number / 1000f64.powi(step as i32);
    format!(
        "{}{}",
        trim_zeros(format!("{:.*}", decimals, reduced)),
        SUFFIXES[step]
    )
}

fn trim_zeros(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Displays a calculation outcome to stdout.
///
/// This function prints:
/// - The setup and its timings
/// - Produced items with their value and sell venue
/// - Experience, pet progress and costs
/// - Advisory notes
pub fn display_outcome(config: &Configuration, outcome: &Outcome, catalog: &Catalog) {
    println!();
    println!("+================================================================+");
    println!("|                  MINION PRODUCTION RESULTS                     |");
    println!("+================================================================+");
    println!();

    println!("[SETUP]");
    println!("----------------------------------------------------------------");
    println!(
        "  {} Minion T{} x{}",
        config.node, config.tier, config.amount
    );
    println!("  Setup ID:         {}", outcome.setup_id);
    println!("  Time per action:  {:.2}s", outcome.action_time);
    println!("  Harvests:         {}", reduced_number(outcome.harvests, 2));
    println!("  Duration:         {}", format_time(outcome.total_seconds));

    println!();
    println!("[ITEMS]");
    println!("----------------------------------------------------------------");
    println!(
        "{:<28} {:>12} {:>12} {:>8}",
        "Item", "Amount", "Profit", "Venue"
    );
    println!("----------------------------------------------------------------");
    for (id, amount) in &outcome.items {
        let profit = outcome.item_profits.get(id).copied().unwrap_or(0.0);
        let venue = outcome
            .sell_locations
            .get(id)
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!(
            "{:<28} {:>12} {:>12} {:>8}",
            catalog.display(id),
            reduced_number(*amount, 2),
            reduced_number(profit, 2),
            venue
        );
    }

    if !outcome.xp.is_empty() {
        println!();
        println!("[EXPERIENCE]");
        println!("----------------------------------------------------------------");
        for (skill, xp) in &outcome.xp {
            println!("  {:<16} {}", skill, reduced_number(*xp, 2));
        }
    }

    if !outcome.pets.is_empty() {
        println!();
        println!("[PETS]");
        println!("----------------------------------------------------------------");
        for progress in &outcome.pets {
            let slot = match progress.slot {
                PetSlot::Leveling => "Leveling",
                PetSlot::ExpShare1 => "Exp Share 1",
                PetSlot::ExpShare2 => "Exp Share 2",
                PetSlot::ExpShare3 => "Exp Share 3",
            };
            println!(
                "  {:<12} {:<16} {} xp ({:.2} levelled)",
                slot,
                progress.pet,
                reduced_number(progress.pet_xp, 2),
                progress.levelled
            );
        }
        println!("  Pet profit:       {}", reduced_number(outcome.pet_profit, 2));
    }

    println!();
    println!("[SUMMARY]");
    println!("----------------------------------------------------------------");
    println!("  Item profit:      {}", reduced_number(outcome.item_profit, 2));
    if outcome.fuel_cost > 0.0 {
        println!(
            "  Fuel cost:        {} ({} used)",
            reduced_number(outcome.fuel_cost, 2),
            reduced_number(outcome.fuel_amount, 2)
        );
    }
    println!("  Total profit:     {}", reduced_number(outcome.total_profit, 2));
    println!(
        "  Storage:          {} / {} slots",
        outcome.used_storage, outcome.available_storage
    );
    match outcome.fill_time {
        Some(seconds) => println!("  Fills in:         {}", format_time(seconds)),
        None => println!("  Fills in:         never"),
    }
    println!("  Setup cost:       {}", reduced_number(outcome.setup_cost, 2));
    if !outcome.extra_cost.is_empty() {
        println!("  Extra cost:       {}", outcome.extra_cost);
    }
    if config.free_will {
        println!(
            "  Free Will cost:   {} (best from T{})",
            reduced_number(outcome.free_will_cost, 2),
            outcome.optimal_free_will_tier
        );
    }

    if !outcome.notes.is_empty() {
        println!();
        println!("[NOTES]");
        println!("----------------------------------------------------------------");
        for (topic, message) in outcome.notes.iter() {
            println!("  {}: {}", topic, message);
        }
    }
    println!();
}

/// Displays add-on outputs, one line per add-on.
pub fn display_addon_outputs(outputs: &[(String, String)]) {
    if outputs.is_empty() {
        return;
    }
    println!("[ADD-ONS]");
    println!("----------------------------------------------------------------");
    for (name, output) in outputs {
        if output.contains('\n') {
            println!("  {}:", name);
            for line in output.lines() {
                println!("    {}", line);
            }
        } else {
            println!("  {}: {}", name, output);
        }
    }
    println!();
}
