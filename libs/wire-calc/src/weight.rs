//! Conductor weight calculator
//!
//! Converts product geometry into conductor mass (kg). Every category is a
//! variant of [`Category`] and maps onto one formula; the calibration
//! constants live in [`WeightFactors`] so they can be corrected without
//! touching the dispatch.
//!
//! The base formula is calibrated for lengths in gaj:
//!
//! ```text
//! weight = gauge² × factor × strands × length / divisor
//! ```
//!
//! Bad geometry is fail-soft. Non-positive gauge or length, zero strands, or a
//! non-finite result all produce `0.0` rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CalcError, Result};

/// House wire (copper) calibration factor
pub const HOUSE_WIRE_FACTOR: f64 = 412.0;

/// Aluminium cable calibration factor
///
/// Placeholder value carried over from the costing sheet, not a verified
/// density ratio. Override through [`WeightFactors`].
pub const ALUMINIUM_FACTOR: f64 = 300.0;

/// Divisor shared by all strand formulas
pub const CALIBRATION_DIVISOR: f64 = 100_000_000.0;

/// Product category with its category-specific inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Category {
    HouseWire,
    Aluminium,
    /// Multi-core cable; `cores` is expected to be at least 2
    MultiCore { cores: u32 },
    /// Armoured cable; armour mass is supplied directly, not derived
    Armoured { armour_weight: f64 },
    /// Anything else; costed with the house wire formula
    Custom,
}

impl Category {
    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::HouseWire => CategoryKind::HouseWire,
            Category::Aluminium => CategoryKind::Aluminium,
            Category::MultiCore { .. } => CategoryKind::MultiCore,
            Category::Armoured { .. } => CategoryKind::Armoured,
            Category::Custom => CategoryKind::Custom,
        }
    }

    /// Armour mass carried by this category (0 for everything but armoured)
    pub fn armour_weight(&self) -> f64 {
        match self {
            Category::Armoured { armour_weight } => non_negative(*armour_weight),
            _ => 0.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::MultiCore { cores } => write!(f, "{} ({} cores)", self.kind(), cores),
            Category::Armoured { armour_weight } => {
                write!(f, "{} (armour {} kg)", self.kind(), armour_weight)
            },
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Category label without its category-specific inputs
///
/// Used where categories arrive as text (CLI flags, catalog sheets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    HouseWire,
    Aluminium,
    MultiCore,
    Armoured,
    Custom,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 5] = [
        CategoryKind::HouseWire,
        CategoryKind::Aluminium,
        CategoryKind::MultiCore,
        CategoryKind::Armoured,
        CategoryKind::Custom,
    ];

    /// Name used on costing sheets, e.g. `House Wire`
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryKind::HouseWire => "House Wire",
            CategoryKind::Aluminium => "Aluminium Cable",
            CategoryKind::MultiCore => "Multi-core Cable",
            CategoryKind::Armoured => "Armoured Cable",
            CategoryKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CategoryKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "housewire" | "house" => Ok(CategoryKind::HouseWire),
            "aluminium" | "aluminiumcable" | "aluminum" | "aluminumcable" | "alu" => {
                Ok(CategoryKind::Aluminium)
            },
            "multicore" | "multicorecable" => Ok(CategoryKind::MultiCore),
            "armoured" | "armouredcable" | "armored" | "armoredcable" => {
                Ok(CategoryKind::Armoured)
            },
            "custom" => Ok(CategoryKind::Custom),
            _ => Err(CalcError::unknown_category(s.trim())),
        }
    }
}

/// Physical inputs for one product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Wire gauge (mm)
    pub gauge: f64,
    /// Number of strands
    pub strands: u32,
    /// Length (gaj)
    pub length: f64,
    /// Total weight of the wound coil (kg)
    pub coil_weight: f64,
    pub category: Category,
}

/// Calibration constants for the strand formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightFactors {
    pub house_wire: f64,
    pub aluminium: f64,
    pub divisor: f64,
}

impl Default for WeightFactors {
    fn default() -> Self {
        Self {
            house_wire: HOUSE_WIRE_FACTOR,
            aluminium: ALUMINIUM_FACTOR,
            divisor: CALIBRATION_DIVISOR,
        }
    }
}

impl WeightFactors {
    /// House wire conductor weight
    pub fn house_wire(&self, gauge: f64, strands: u32, length: f64) -> f64 {
        strand_formula(self.house_wire, self.divisor, gauge, strands, length)
    }

    /// Aluminium cable conductor weight
    pub fn aluminium(&self, gauge: f64, strands: u32, length: f64) -> f64 {
        strand_formula(self.aluminium, self.divisor, gauge, strands, length)
    }

    /// Multi-core: house wire weight of one core times the core count
    pub fn multi_core(&self, gauge: f64, strands: u32, length: f64, cores: u32) -> f64 {
        finite_or_zero(self.house_wire(gauge, strands, length) * f64::from(cores))
    }

    /// Armoured: house wire weight plus the supplied armour mass
    pub fn armoured(&self, gauge: f64, strands: u32, length: f64, armour_weight: f64) -> f64 {
        finite_or_zero(self.house_wire(gauge, strands, length) + non_negative(armour_weight))
    }

    /// Conductor weight (kg) for a product, dispatched on its category
    pub fn conductor_weight(&self, spec: &ProductSpec) -> f64 {
        let ProductSpec {
            gauge,
            strands,
            length,
            ..
        } = *spec;

        match spec.category {
            Category::HouseWire | Category::Custom => self.house_wire(gauge, strands, length),
            Category::Aluminium => self.aluminium(gauge, strands, length),
            Category::MultiCore { cores } => self.multi_core(gauge, strands, length, cores),
            Category::Armoured { armour_weight } => {
                self.armoured(gauge, strands, length, armour_weight)
            },
        }
    }

    /// Metal weight billed at the conductor rate
    ///
    /// Same as [`conductor_weight`](Self::conductor_weight) except for
    /// armoured cable, where the armour mass is left out.
    pub fn metal_weight(&self, spec: &ProductSpec) -> f64 {
        match spec.category {
            Category::Armoured { .. } => self.house_wire(spec.gauge, spec.strands, spec.length),
            _ => self.conductor_weight(spec),
        }
    }
}

/// House wire conductor weight with the default factors
pub fn house_wire_weight(gauge: f64, strands: u32, length: f64) -> f64 {
    WeightFactors::default().house_wire(gauge, strands, length)
}

/// Aluminium cable conductor weight with the default factors
pub fn aluminium_weight(gauge: f64, strands: u32, length: f64) -> f64 {
    WeightFactors::default().aluminium(gauge, strands, length)
}

/// Multi-core cable conductor weight with the default factors
pub fn multi_core_weight(gauge: f64, strands: u32, length: f64, cores: u32) -> f64 {
    WeightFactors::default().multi_core(gauge, strands, length, cores)
}

/// Armoured cable conductor weight with the default factors
pub fn armoured_weight(gauge: f64, strands: u32, length: f64, armour_weight: f64) -> f64 {
    WeightFactors::default().armoured(gauge, strands, length, armour_weight)
}

/// Conductor weight (kg) with the default factors
pub fn conductor_weight(spec: &ProductSpec) -> f64 {
    WeightFactors::default().conductor_weight(spec)
}

/// Insulation weight inferred from the coil: `max(0, coil - conductor)`
pub fn insulation_weight(coil_weight: f64, conductor_weight: f64) -> f64 {
    // f64::max ignores NaN, so a NaN difference lands on 0
    (coil_weight - conductor_weight).max(0.0)
}

fn strand_formula(factor: f64, divisor: f64, gauge: f64, strands: u32, length: f64) -> f64 {
    if !is_positive(gauge) || strands == 0 || !is_positive(length) {
        debug!(
            gauge = gauge,
            strands = strands,
            length = length,
            "non-positive geometry, conductor weight is 0"
        );
        return 0.0;
    }

    let weight = gauge.powi(2) * factor * f64::from(strands) * length / divisor;
    finite_or_zero(weight)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn finite_or_zero(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        debug!(weight = weight, "conductor weight out of range, using 0");
        0.0
    }
}
