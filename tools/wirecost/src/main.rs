//! wirecost - Wire and cable costing tool
//!
//! Calculates conductor, insulation, armour and labour cost for one product,
//! or compares a catalog item against custom inputs.

mod catalog;
mod config;
mod input;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};
use wire_calc::{estimate, Comparison, CostBreakdown, WeightFactors};

use crate::catalog::csv_loader::{Catalog, CatalogEntry};
use crate::config::AppConfig;
use crate::input::{InputArgs, Preset};

#[derive(Parser)]
#[command(name = "wirecost")]
#[command(about = "Wire & cable costing - calculator and comparison maker")]
#[command(long_about = "Wire & cable costing - calculator and comparison maker

Commands:
  calc        Cost one product from gauge, strands, length, coil weight and rates
  compare     Compare a catalog item (standard) against custom inputs
  catalog     Browse catalog presets

Examples:
  wirecost calc --gauge 9.5 --strands 14 --length 100 --coil-weight 1.2
  wirecost calc --category multi-core --cores 3 --labour-type per_kg --labour-value 15
  wirecost compare --catalog data/catalog.csv --from-category \"House Wire\" --item HouseWire-1mm --gauge 10
  wirecost catalog list

Use 'wirecost <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./wirecost.yaml when present)
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Catalog CSV file (default: from configuration, else built-in sample)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cost a single product
    #[command(about = "Calculate the cost breakdown of one product")]
    Calc {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare catalog item against custom inputs
    #[command(about = "Compare a catalog item (standard) with custom overrides")]
    Compare(CompareArgs),

    /// Browse catalog presets
    #[command(about = "Browse catalog presets")]
    Catalog {
        #[command(subcommand)]
        command: catalog::CatalogCommands,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// Catalog category (default: first category)
    #[arg(long = "from-category")]
    from_category: Option<String>,

    /// Catalog item (default: first item of the category)
    #[arg(long)]
    item: Option<String>,

    /// Custom overrides applied on top of the catalog item
    #[command(flatten)]
    input: InputArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = AppConfig::load(cli.config_path.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".to_string();
    }
    if cli.no_color {
        config.log.ansi = false;
    }
    if let Err(e) = common::logging::init_with_config(&config.log) {
        eprintln!("{} Failed to initialize logging: {}", "WARN".yellow(), e);
    }

    debug!("Configuration: {:?}", config);

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.clone());

    match cli.command {
        Commands::Calc { input, json } => {
            let preset = input.apply(&Preset::with_rates(config.rates));
            let breakdown = calculate(&preset, &config.factors)?;

            if json {
                render::print_json(&breakdown)?;
            } else {
                let title = format!("Calculator - {}", preset.product_spec().category);
                render::print_breakdown(&title, &breakdown, &config.currency);
            }
        },
        Commands::Compare(args) => {
            let catalog = load_catalog(catalog_path.as_deref());
            let entry = select_entry(&catalog, &args)?;
            let standard_preset = entry.preset().with_context(|| {
                format!("Catalog item '{}' / '{}' is invalid", entry.category, entry.item)
            })?;
            let custom_preset = args.input.apply(&standard_preset);

            let standard = calculate(&standard_preset, &config.factors)
                .context("Standard (catalog) inputs are invalid")?;
            let custom = calculate(&custom_preset, &config.factors)
                .context("Custom inputs are invalid")?;
            let comparison = Comparison::new(standard, custom);

            info!(
                item = %entry.item,
                difference = comparison.difference_pct(),
                "comparison complete"
            );

            if args.json {
                render::print_json(&serde_json::json!({
                    "category": entry.category,
                    "item": entry.item,
                    "standard": comparison.standard,
                    "custom": comparison.custom,
                    "difference_pct": finite_or_null(comparison.difference_pct()),
                }))?;
            } else {
                let title = format!("Comparison - {} / {}", entry.category, entry.item);
                render::print_comparison(&title, &comparison, &config.currency);
            }
        },
        Commands::Catalog { command } => {
            let catalog = load_catalog(catalog_path.as_deref());
            catalog::handle_command(command, &catalog, &config.currency)?;
        },
    }

    Ok(())
}

/// Validate a preset and run it through the engine
fn calculate(preset: &Preset, factors: &WeightFactors) -> Result<CostBreakdown> {
    preset.validate()?;
    let breakdown = estimate(&preset.product_spec(), &preset.rates, factors)?;
    Ok(breakdown)
}

/// Catalog from file or sample; a load failure only prints a warning
fn load_catalog(path: Option<&std::path::Path>) -> Catalog {
    let (catalog, warning) = Catalog::load_or_sample(path);
    if let Some(message) = warning {
        eprintln!("{} {}", "WARN".yellow(), message);
    }
    catalog
}

/// Catalog item for the standard side; without a category the item name is
/// looked up across the whole catalog
fn select_entry<'a>(catalog: &'a Catalog, args: &CompareArgs) -> Result<&'a CatalogEntry> {
    match (args.from_category.as_deref(), args.item.as_deref()) {
        (Some(category), Some(item)) => catalog
            .find(category, item)
            .ok_or_else(|| anyhow!("Item '{}' not found in category '{}'", item, category)),
        (Some(category), None) => catalog
            .items(category)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No items in category '{}'", category)),
        (None, Some(item)) => catalog
            .entries()
            .iter()
            .find(|e| e.item.eq_ignore_ascii_case(item.trim()))
            .ok_or_else(|| anyhow!("Item '{}' not found in catalog", item)),
        (None, None) => catalog.first().ok_or_else(|| anyhow!("Catalog is empty")),
    }
}

fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
