//! CSV loader for catalog presets
//!
//! Expected header (column order is free, extra columns are ignored):
//!
//! ```text
//! Category,Item,Gauge,Strands,Length,CoilWeight,PVC_Rate,Conductor_Rate,Labour_Type,Labour_Value
//! ```
//!
//! Optional columns: `Cores`, `ArmourWeight`, `Armour_Rate`.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use wire_calc::{CalcError, CategoryKind, LabourMode, RateSheet};

use crate::input::Preset;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] csv::Error),

    #[error("Catalog has no items")]
    Empty,
}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Gauge")]
    pub gauge: f64,
    #[serde(rename = "Strands")]
    pub strands: u32,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "CoilWeight")]
    pub coil_weight: f64,
    #[serde(rename = "PVC_Rate")]
    pub pvc_rate: f64,
    #[serde(rename = "Conductor_Rate")]
    pub conductor_rate: f64,
    /// Kept as text; parsed strictly when the row is used
    #[serde(rename = "Labour_Type")]
    pub labour_type: String,
    #[serde(rename = "Labour_Value")]
    pub labour_value: f64,
    #[serde(rename = "Cores", default)]
    pub cores: Option<u32>,
    #[serde(rename = "ArmourWeight", default)]
    pub armour_weight: Option<f64>,
    #[serde(rename = "Armour_Rate", default)]
    pub armour_rate: Option<f64>,
}

impl CatalogEntry {
    /// Rates of this row; an unknown labour type is a hard error
    pub fn rate_sheet(&self) -> Result<RateSheet, CalcError> {
        let labour_mode: LabourMode = self.labour_type.parse()?;
        Ok(RateSheet {
            pvc_rate: self.pvc_rate,
            conductor_rate: self.conductor_rate,
            armour_rate: self.armour_rate.unwrap_or(0.0),
            labour_mode,
            labour_value: self.labour_value,
        })
    }

    pub fn category_kind(&self) -> Result<CategoryKind, CalcError> {
        self.category.parse()
    }

    /// Row as a calculation preset
    pub fn preset(&self) -> Result<Preset, CalcError> {
        Ok(Preset {
            category: self.category_kind()?,
            gauge: self.gauge,
            strands: self.strands,
            length: self.length,
            coil_weight: self.coil_weight,
            cores: self.cores,
            armour_weight: self.armour_weight,
            rates: self.rate_sheet()?,
        })
    }
}

/// Where the catalog came from
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Sample,
}

/// Ordered list of presets
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    source: CatalogSource,
}

impl Catalog {
    /// Parse catalog rows from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for result in csv_reader.deserialize::<CatalogEntry>() {
            entries.push(result?);
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(entries)
    }

    /// Load a catalog CSV file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = Self::from_reader(BufReader::new(file))?;

        info!("Loaded {} catalog items from {}", entries.len(), path.display());

        Ok(Self {
            entries,
            source: CatalogSource::File(path.to_path_buf()),
        })
    }

    /// Load `path` if given, falling back to the built-in sample catalog
    ///
    /// A load failure is never fatal: the sample is returned together with a
    /// warning message for the caller to show.
    pub fn load_or_sample(path: Option<&Path>) -> (Self, Option<String>) {
        let Some(path) = path else {
            return (Self::sample(), None);
        };

        match Self::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                warn!("Could not read catalog {}: {}", path.display(), e);
                let message = format!(
                    "Could not read catalog {} ({}). Using sample catalog.",
                    path.display(),
                    e
                );
                (Self::sample(), Some(message))
            },
        }
    }

    /// Built-in presets used when no catalog file is available
    pub fn sample() -> Self {
        let row = |category: &str,
                   item: &str,
                   gauge: f64,
                   strands: u32,
                   coil_weight: f64,
                   pvc_rate: f64,
                   conductor_rate: f64,
                   labour_type: &str,
                   labour_value: f64| CatalogEntry {
            category: category.to_string(),
            item: item.to_string(),
            gauge,
            strands,
            length: 100.0,
            coil_weight,
            pvc_rate,
            conductor_rate,
            labour_type: labour_type.to_string(),
            labour_value,
            cores: None,
            armour_weight: None,
            armour_rate: None,
        };

        Self {
            entries: vec![
                row("House Wire", "HouseWire-1mm", 9.5, 14, 1.2, 130.0, 950.0, "percentage", 4.0),
                row("House Wire", "HouseWire-1.5mm", 12.0, 20, 1.8, 130.0, 950.0, "percentage", 4.0),
                row("Aluminium Cable", "Alu-2.5mm", 9.5, 14, 1.4, 120.0, 180.0, "per_kg", 20.0),
            ],
            source: CatalogSource::Sample,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Distinct category names, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.entries.iter().map(|e| e.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Items of one category, in catalog order
    pub fn items(&self, category: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category.trim()))
            .collect()
    }

    pub fn find(&self, category: &str, item: &str) -> Option<&CatalogEntry> {
        self.items(category)
            .into_iter()
            .find(|e| e.item.eq_ignore_ascii_case(item.trim()))
    }

    /// Default selection: first item of the first category
    pub fn first(&self) -> Option<&CatalogEntry> {
        self.categories()
            .first()
            .and_then(|category| self.items(category).into_iter().next())
    }
}
