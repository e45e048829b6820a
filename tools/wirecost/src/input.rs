//! Product and rate inputs from the command line
//!
//! Every flag is optional and overrides a [`Preset`]: the configured defaults
//! for `calc`, or the selected catalog item for `compare`. Field-level range
//! checks happen here, before the engine sees the values.

use clap::Args;
use serde::Serialize;
use thiserror::Error;
use wire_calc::{Category, CategoryKind, LabourMode, ProductSpec, RateSheet};

/// Input validation errors
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be greater than {min}, got {value}")]
    NotAbove {
        field: &'static str,
        min: f64,
        value: f64,
    },

    #[error("{field} must be at least {min}, got {value}")]
    Below {
        field: &'static str,
        min: f64,
        value: f64,
    },
}

/// Complete set of values one calculation starts from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub category: CategoryKind,
    pub gauge: f64,
    pub strands: u32,
    pub length: f64,
    pub coil_weight: f64,
    pub cores: Option<u32>,
    pub armour_weight: Option<f64>,
    pub rates: RateSheet,
}

impl Preset {
    /// Built-in geometry (9.5 mm, 14 strands, 100 gaj, 1.2 kg coil) with the given rates
    pub fn with_rates(rates: RateSheet) -> Self {
        Self {
            category: CategoryKind::HouseWire,
            gauge: 9.5,
            strands: 14,
            length: 100.0,
            coil_weight: 1.2,
            cores: None,
            armour_weight: None,
            rates,
        }
    }

    /// Product spec for the engine; multi-core defaults to 2 cores and
    /// armoured to no armour when the preset leaves them out
    pub fn product_spec(&self) -> ProductSpec {
        let category = match self.category {
            CategoryKind::HouseWire => Category::HouseWire,
            CategoryKind::Aluminium => Category::Aluminium,
            CategoryKind::MultiCore => Category::MultiCore {
                cores: self.cores.unwrap_or(2),
            },
            CategoryKind::Armoured => Category::Armoured {
                armour_weight: self.armour_weight.unwrap_or(0.0),
            },
            CategoryKind::Custom => Category::Custom,
        };

        ProductSpec {
            gauge: self.gauge,
            strands: self.strands,
            length: self.length,
            coil_weight: self.coil_weight,
            category,
        }
    }

    /// Range checks matching the input form limits
    pub fn validate(&self) -> Result<(), InputError> {
        above("gauge", self.gauge, 0.0)?;
        at_least("strands", f64::from(self.strands), 1.0)?;
        above("length", self.length, 0.0)?;
        above("coil weight", self.coil_weight, 0.0)?;
        at_least("PVC rate", self.rates.pvc_rate, 0.0)?;
        at_least("conductor rate", self.rates.conductor_rate, 0.0)?;
        at_least("armour rate", self.rates.armour_rate, 0.0)?;
        at_least("labour value", self.rates.labour_value, 0.0)?;

        if self.category == CategoryKind::MultiCore {
            at_least("cores", f64::from(self.cores.unwrap_or(2)), 2.0)?;
        }
        if let Some(armour) = self.armour_weight {
            at_least("armour weight", armour, 0.0)?;
        }
        Ok(())
    }
}

fn above(field: &'static str, value: f64, min: f64) -> Result<(), InputError> {
    // written so NaN fails too
    if value > min {
        Ok(())
    } else {
        Err(InputError::NotAbove { field, min, value })
    }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), InputError> {
    if value >= min {
        Ok(())
    } else {
        Err(InputError::Below { field, min, value })
    }
}

/// Product and rate flags shared by `calc` and `compare`
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Wire category: house-wire, aluminium, multi-core, armoured, custom
    #[arg(long)]
    pub category: Option<CategoryKind>,

    /// Gauge (mm)
    #[arg(short, long)]
    pub gauge: Option<f64>,

    /// Number of strands
    #[arg(short, long)]
    pub strands: Option<u32>,

    /// Length (gaj)
    #[arg(short, long)]
    pub length: Option<f64>,

    /// Coil weight (kg)
    #[arg(long = "coil-weight")]
    pub coil_weight: Option<f64>,

    /// Number of cores (multi-core only)
    #[arg(long)]
    pub cores: Option<u32>,

    /// Armour weight in kg (armoured only)
    #[arg(long = "armour-weight")]
    pub armour_weight: Option<f64>,

    /// PVC / insulation rate per kg
    #[arg(long = "pvc-rate")]
    pub pvc_rate: Option<f64>,

    /// Conductor rate per kg
    #[arg(long = "conductor-rate")]
    pub conductor_rate: Option<f64>,

    /// Armour rate per kg
    #[arg(long = "armour-rate")]
    pub armour_rate: Option<f64>,

    /// Labour type: percentage or per_kg
    #[arg(long = "labour-type")]
    pub labour_type: Option<LabourMode>,

    /// Labour value: percent for `percentage`, currency per kg for `per_kg`
    #[arg(long = "labour-value")]
    pub labour_value: Option<f64>,
}

impl InputArgs {
    /// Overlay the flags that were given onto `base`
    pub fn apply(&self, base: &Preset) -> Preset {
        let mut rates = base.rates;
        rates.pvc_rate = self.pvc_rate.unwrap_or(rates.pvc_rate);
        rates.conductor_rate = self.conductor_rate.unwrap_or(rates.conductor_rate);
        rates.armour_rate = self.armour_rate.unwrap_or(rates.armour_rate);

        // switching labour type without a value must not carry a percentage
        // over as a per-kg rate (or the reverse)
        match (self.labour_type, self.labour_value) {
            (Some(mode), Some(value)) => {
                rates.labour_mode = mode;
                rates.labour_value = value;
            },
            (Some(mode), None) if mode != rates.labour_mode => {
                rates.labour_mode = mode;
                rates.labour_value = 0.0;
            },
            (_, Some(value)) => rates.labour_value = value,
            _ => {},
        }

        Preset {
            category: self.category.unwrap_or(base.category),
            gauge: self.gauge.unwrap_or(base.gauge),
            strands: self.strands.unwrap_or(base.strands),
            length: self.length.unwrap_or(base.length),
            coil_weight: self.coil_weight.unwrap_or(base.coil_weight),
            cores: self.cores.or(base.cores),
            armour_weight: self.armour_weight.or(base.armour_weight),
            rates,
        }
    }
}
