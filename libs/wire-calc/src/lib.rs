//! wire-calc - Costing engine for wire and cable products
//!
//! Computes conductor weight from product geometry and aggregates material
//! and labour costs into a [`CostBreakdown`].
//!
//! # Features
//!
//! - **Conductor weight**: category formulas for house wire, aluminium,
//!   multi-core and armoured cable, with configurable calibration factors
//! - **Cost aggregation**: conductor, insulation, armour and labour lines with
//!   percentage or per-kg labour charging
//! - **Comparison**: percentage difference between two final costs
//!
//! Everything here is pure and synchronous.
//!
//! # Example
//!
//! ```rust
//! use wire_calc::{conductor_weight, cost_breakdown, insulation_weight};
//! use wire_calc::{Category, LabourMode, ProductSpec, RateSheet};
//!
//! let spec = ProductSpec {
//!     gauge: 9.5,
//!     strands: 14,
//!     length: 100.0,
//!     coil_weight: 1.2,
//!     category: Category::HouseWire,
//! };
//!
//! let conductor = conductor_weight(&spec);
//! let insulation = insulation_weight(spec.coil_weight, conductor);
//!
//! let rates = RateSheet {
//!     pvc_rate: 130.0,
//!     conductor_rate: 950.0,
//!     armour_rate: 0.0,
//!     labour_mode: LabourMode::Percentage,
//!     labour_value: 4.0,
//! };
//!
//! let result = cost_breakdown(conductor, insulation, 0.0, &rates).unwrap();
//! assert_eq!(result.final_cost, result.base_cost() + result.labour_cost);
//! ```
//!
//! # Formulas
//!
//! | Category | Conductor weight (kg) |
//! |----------|-----------------------|
//! | House wire | `gauge² × 412 × strands × length / 1e8` |
//! | Aluminium | `gauge² × 300 × strands × length / 1e8` |
//! | Multi-core | house wire × cores |
//! | Armoured | house wire + armour weight |
//! | Custom | house wire |
//!
//! [`estimate`] bills armour at `armour_rate` only; the conductor line and
//! per-kg labour use the metal weight.

pub mod compare;
pub mod cost;
pub mod error;
pub mod weight;

// Re-exports for convenience
pub use compare::{percent_difference, Comparison};
pub use cost::{cost_breakdown, estimate, CostBreakdown, CostComponent, LabourMode, RateSheet};
pub use error::{CalcError, Result};
pub use weight::{
    aluminium_weight, armoured_weight, conductor_weight, house_wire_weight, insulation_weight,
    multi_core_weight, Category, CategoryKind, ProductSpec, WeightFactors, ALUMINIUM_FACTOR,
    CALIBRATION_DIVISOR, HOUSE_WIRE_FACTOR,
};
