//! Terminal output for breakdowns, comparisons and catalogs

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use wire_calc::{Comparison, CostBreakdown};

use crate::catalog::csv_loader::{Catalog, CatalogEntry, CatalogSource};

const BAR_WIDTH: usize = 30;

/// Percent value for display; `n/a` when undefined
pub fn fmt_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2} %", value)
    } else {
        "n/a".to_string()
    }
}

/// Labelled metric values: weights to 4 decimals, costs to 2
///
/// Armour rows only appear when `with_armour` is set.
fn metric_values(b: &CostBreakdown, currency: &str, with_armour: bool) -> Vec<(String, f64, usize)> {
    let mut rows = vec![
        ("Conductor Weight (kg)".to_string(), b.conductor_weight, 4),
        ("Insulation Weight (kg)".to_string(), b.insulation_weight, 4),
    ];
    if with_armour {
        rows.push(("Armour Weight (kg)".to_string(), b.armour_weight, 4));
    }
    rows.push((format!("Conductor Cost ({})", currency), b.conductor_cost, 2));
    rows.push((format!("Insulation Cost ({})", currency), b.insulation_cost, 2));
    if with_armour {
        rows.push((format!("Armour Cost ({})", currency), b.armour_cost, 2));
    }
    rows.push((format!("Labour Cost ({})", currency), b.labour_cost, 2));
    rows.push((format!("Final Cost ({})", currency), b.final_cost, 2));
    rows
}

fn has_armour(b: &CostBreakdown) -> bool {
    b.armour_weight > 0.0 || b.armour_cost != 0.0
}

/// Metric rows of one breakdown, already formatted
pub fn metric_rows(b: &CostBreakdown, currency: &str) -> Vec<(String, String)> {
    metric_values(b, currency, has_armour(b))
        .into_iter()
        .map(|(label, value, decimals)| (label, format!("{:.*}", decimals, value)))
        .collect()
}

/// Side-by-side rows: metric, standard, custom
pub fn comparison_rows(comparison: &Comparison, currency: &str) -> Vec<(String, String, String)> {
    let with_armour = has_armour(&comparison.standard) || has_armour(&comparison.custom);
    let standard = metric_values(&comparison.standard, currency, with_armour);
    let custom = metric_values(&comparison.custom, currency, with_armour);

    standard
        .into_iter()
        .zip(custom)
        .map(|((label, s, decimals), (_, c, _))| {
            (
                label,
                format!("{:.*}", decimals, s),
                format!("{:.*}", decimals, c),
            )
        })
        .collect()
}

/// Horizontal bar for a percent share
pub fn share_bar(share: f64, width: usize) -> String {
    let filled = if share.is_finite() {
        ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn print_proportions(b: &CostBreakdown) {
    println!("{}", "Cost Breakdown".bright_cyan());

    let components = b.components();
    if components.is_empty() {
        println!("  No cost data");
        return;
    }

    let total: f64 = components.iter().map(|c| c.value).sum();
    for component in components {
        let share = component.share(total);
        println!(
            "  {:<12} {} {:>6.1}%",
            component.label,
            share_bar(share, BAR_WIDTH).bright_blue(),
            share
        );
    }
}

/// Print a single breakdown with its proportional chart
pub fn print_breakdown(title: &str, b: &CostBreakdown, currency: &str) {
    println!();
    println!("{}", title.bright_cyan().bold());
    println!(
        "{} {}",
        format!("Final Cost ({}):", currency).bright_green(),
        format!("{:.2}", b.final_cost).bright_yellow().bold()
    );
    println!("{}", "-".repeat(44));

    for (label, value) in metric_rows(b, currency) {
        println!("  {:<28} {:>12}", label, value);
    }
    println!();
    print_proportions(b);
}

/// Print a standard vs custom comparison
pub fn print_comparison(title: &str, comparison: &Comparison, currency: &str) {
    println!();
    println!("{}", title.bright_cyan().bold());
    println!("  {:<28} {:>12} {:>12}", "Metric".bold(), "Standard".bold(), "Custom".bold());
    println!("{}", "-".repeat(56));

    for (label, standard, custom) in comparison_rows(comparison, currency) {
        println!("  {:<28} {:>12} {:>12}", label, standard, custom);
    }

    let diff = comparison.difference_pct();
    let diff_text = fmt_pct(diff);
    let diff_colored = if diff > 0.0 {
        diff_text.bright_red()
    } else if diff < 0.0 {
        diff_text.bright_green()
    } else {
        diff_text.normal()
    };
    println!();
    println!(
        "{} {}",
        "Difference (Custom vs Standard):".bright_cyan(),
        diff_colored
    );
    println!();
    print_proportions(&comparison.custom);
}

/// Print catalog items, optionally limited to one category
pub fn print_catalog(catalog: &Catalog, category: Option<&str>) {
    let source = match catalog.source() {
        CatalogSource::File(path) => path.display().to_string(),
        CatalogSource::Sample => "built-in sample".to_string(),
    };
    println!("{} {}", "Catalog:".bright_cyan(), source);
    println!(
        "  {:<18} {:<22} {:>7} {:>7} {:>7} {:>7}  {}",
        "Category".bold(),
        "Item".bold(),
        "Gauge".bold(),
        "Strands".bold(),
        "Length".bold(),
        "Coil".bold(),
        "Labour".bold()
    );

    let entries: Vec<&CatalogEntry> = match category {
        Some(category) => catalog.items(category),
        None => catalog.entries().iter().collect(),
    };
    if entries.is_empty() {
        println!("  {}", "No items".yellow());
    }

    for e in entries {
        println!(
            "  {:<18} {:<22} {:>7.3} {:>7} {:>7} {:>7.3}  {} {}",
            e.category, e.item, e.gauge, e.strands, e.length, e.coil_weight, e.labour_type, e.labour_value
        );
    }
}

/// Print every field of one catalog item
pub fn print_entry(entry: &CatalogEntry, currency: &str) {
    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("{} / {}", entry.category.bright_cyan(), entry.item.bright_yellow());
    let rows = [
        ("Gauge (mm)".to_string(), entry.gauge.to_string()),
        ("Strands".to_string(), entry.strands.to_string()),
        ("Length (gaj)".to_string(), entry.length.to_string()),
        ("Coil Weight (kg)".to_string(), entry.coil_weight.to_string()),
        ("Cores".to_string(), opt(entry.cores.map(|v| v.to_string()))),
        ("Armour Weight (kg)".to_string(), opt(entry.armour_weight.map(|v| v.to_string()))),
        (format!("PVC Rate ({}/kg)", currency), entry.pvc_rate.to_string()),
        (format!("Conductor Rate ({}/kg)", currency), entry.conductor_rate.to_string()),
        (format!("Armour Rate ({}/kg)", currency), opt(entry.armour_rate.map(|v| v.to_string()))),
        ("Labour Type".to_string(), entry.labour_type.clone()),
        ("Labour Value".to_string(), entry.labour_value.to_string()),
    ];
    for (label, value) in rows {
        println!("  {:<24} {}", label, value);
    }
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
