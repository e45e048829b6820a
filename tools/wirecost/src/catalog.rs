//! Catalog browsing commands
//!
//! Presets come from a CSV sheet or, when none is available, the built-in
//! sample catalog.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;

pub mod csv_loader;

use crate::render;
use csv_loader::Catalog;

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List catalog items
    #[command(about = "List catalog items, optionally for one category")]
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List category names
    #[command(about = "List the categories present in the catalog")]
    Categories,

    /// Show one item
    #[command(about = "Show every field of one catalog item")]
    Show {
        /// Category name, e.g. "House Wire"
        category: String,

        /// Item name, e.g. HouseWire-1mm
        item: String,
    },
}

pub fn handle_command(cmd: CatalogCommands, catalog: &Catalog, currency: &str) -> Result<()> {
    match cmd {
        CatalogCommands::List { category, json } => {
            if json {
                let entries: Vec<&csv_loader::CatalogEntry> = match category.as_deref() {
                    Some(category) => catalog.items(category),
                    None => catalog.entries().iter().collect(),
                };
                render::print_json(&entries)?;
            } else {
                render::print_catalog(catalog, category.as_deref());
            }
        },
        CatalogCommands::Categories => {
            for category in catalog.categories() {
                println!("  - {}", category);
            }
        },
        CatalogCommands::Show { category, item } => {
            let entry = catalog
                .find(&category, &item)
                .ok_or_else(|| anyhow!("Item '{}' not found in category '{}'", item, category))?;
            render::print_entry(entry, currency);

            // surface a bad labour type or category right away
            if let Err(e) = entry.preset() {
                println!("  {} {}", "WARN".yellow(), e);
            }
        },
    }
    Ok(())
}
