//! Cost aggregator
//!
//! Turns weights and a [`RateSheet`] into a [`CostBreakdown`]:
//!
//! 1. `conductor_cost = conductor_weight × conductor_rate`
//! 2. `insulation_cost = insulation_weight × pvc_rate`
//! 3. `armour_cost = armour_weight × armour_rate` (0 without armour)
//! 4. `base_cost = conductor_cost + insulation_cost + armour_cost`
//! 5. labour, by [`LabourMode`]:
//!    - `Percentage`: `base_cost × labour_value / 100`
//!    - `PerKg`: `conductor_weight × labour_value` (conductor only)
//! 6. `final_cost = base_cost + labour_cost`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CalcError, Result};
use crate::weight::{insulation_weight, ProductSpec, WeightFactors};

/// How labour is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabourMode {
    /// Percentage of material cost; `labour_value = 4.0` means 4%
    Percentage,
    /// Currency per kg of conductor
    PerKg,
}

impl LabourMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabourMode::Percentage => "percentage",
            LabourMode::PerKg => "per_kg",
        }
    }
}

impl fmt::Display for LabourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabourMode {
    type Err = CalcError;

    /// Strict parse: an unknown mode is an error, never a silent default
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(LabourMode::Percentage),
            "per_kg" | "perkg" | "per-kg" => Ok(LabourMode::PerKg),
            other => Err(CalcError::invalid_rate_sheet(format!(
                "unrecognized labour mode '{}', expected 'percentage' or 'per_kg'",
                other
            ))),
        }
    }
}

/// Material and labour rates (currency per kg unless noted)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSheet {
    pub pvc_rate: f64,
    pub conductor_rate: f64,
    #[serde(default)]
    pub armour_rate: f64,
    pub labour_mode: LabourMode,
    pub labour_value: f64,
}

impl Default for RateSheet {
    fn default() -> Self {
        Self {
            pvc_rate: 130.0,
            conductor_rate: 950.0,
            armour_rate: 0.0,
            labour_mode: LabourMode::Percentage,
            labour_value: 4.0,
        }
    }
}

impl RateSheet {
    fn validate(&self) -> Result<()> {
        require_finite("pvc_rate", self.pvc_rate)?;
        require_finite("conductor_rate", self.conductor_rate)?;
        require_finite("armour_rate", self.armour_rate)?;
        require_finite("labour_value", self.labour_value)
    }
}

/// One labelled, non-zero cost line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostComponent {
    pub label: &'static str,
    pub value: f64,
}

impl CostComponent {
    /// Share of `total` in percent; 0 when `total` is not positive
    pub fn share(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.value / total * 100.0
        } else {
            0.0
        }
    }
}

/// Computed costs plus the weights they were derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub conductor_weight: f64,
    pub insulation_weight: f64,
    pub armour_weight: f64,
    pub conductor_cost: f64,
    pub insulation_cost: f64,
    pub armour_cost: f64,
    pub labour_cost: f64,
    pub final_cost: f64,
}

impl CostBreakdown {
    /// Material cost before labour
    pub fn base_cost(&self) -> f64 {
        self.conductor_cost + self.insulation_cost + self.armour_cost
    }

    /// Non-zero cost lines, in display order
    pub fn components(&self) -> Vec<CostComponent> {
        [
            ("Conductor", self.conductor_cost),
            ("Insulation", self.insulation_cost),
            ("Armour", self.armour_cost),
            ("Labour", self.labour_cost),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| CostComponent { label, value })
        .collect()
    }
}

/// Aggregate weights and rates into a cost breakdown
///
/// Rates are not range-checked (negative rates are the caller's business);
/// NaN or infinite inputs are rejected with [`CalcError::InvalidInput`].
pub fn cost_breakdown(
    conductor_weight: f64,
    insulation_weight: f64,
    armour_weight: f64,
    rates: &RateSheet,
) -> Result<CostBreakdown> {
    require_finite("conductor_weight", conductor_weight)?;
    require_finite("insulation_weight", insulation_weight)?;
    require_finite("armour_weight", armour_weight)?;
    rates.validate()?;

    let conductor_cost = conductor_weight * rates.conductor_rate;
    let insulation_cost = insulation_weight * rates.pvc_rate;
    let armour_cost = if armour_weight > 0.0 {
        armour_weight * rates.armour_rate
    } else {
        0.0
    };
    let base_cost = conductor_cost + insulation_cost + armour_cost;

    let labour_cost = match rates.labour_mode {
        LabourMode::Percentage => base_cost * (rates.labour_value / 100.0),
        LabourMode::PerKg => conductor_weight * rates.labour_value,
    };

    Ok(CostBreakdown {
        conductor_weight,
        insulation_weight,
        armour_weight,
        conductor_cost,
        insulation_cost,
        armour_cost,
        labour_cost,
        final_cost: base_cost + labour_cost,
    })
}

/// Full pipeline for one product: conductor weight, insulation weight from
/// the coil, armour weight from the category, then cost aggregation
///
/// Armour mass is part of the armoured conductor weight, so it is taken out
/// of the coil before insulation is inferred, then billed only at
/// `armour_rate`. The conductor line and per-kg labour see the metal alone.
pub fn estimate(
    spec: &ProductSpec,
    rates: &RateSheet,
    factors: &WeightFactors,
) -> Result<CostBreakdown> {
    require_finite("coil_weight", spec.coil_weight)?;

    let conductor = factors.conductor_weight(spec);
    let metal = factors.metal_weight(spec);
    let insulation = insulation_weight(spec.coil_weight, conductor);
    let armour = spec.category.armour_weight();

    debug!(
        category = %spec.category,
        conductor = conductor,
        metal = metal,
        insulation = insulation,
        armour = armour,
        "estimating product cost"
    );

    cost_breakdown(metal, insulation, armour, rates)
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(format!(
            "{} must be a finite number, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::weight::Category;

    fn rates(mode: LabourMode, value: f64) -> RateSheet {
        RateSheet {
            pvc_rate: 130.0,
            conductor_rate: 950.0,
            armour_rate: 0.0,
            labour_mode: mode,
            labour_value: value,
        }
    }

    #[test]
    fn test_percentage_labour() {
        let result = cost_breakdown(0.0138, 1.1862, 0.0, &rates(LabourMode::Percentage, 4.0))
            .unwrap();

        assert!((result.conductor_cost - 13.11).abs() < 1e-9);
        assert!((result.insulation_cost - 154.206).abs() < 1e-9);
        assert!((result.labour_cost - 167.316 * 0.04).abs() < 1e-9);
        assert!((result.final_cost - 167.316 * 1.04).abs() < 1e-9);
    }

    #[test]
    fn test_per_kg_labour_uses_conductor_weight_only() {
        let mut sheet = rates(LabourMode::PerKg, 20.0);
        sheet.armour_rate = 80.0;
        let result = cost_breakdown(0.5, 0.9, 2.0, &sheet).unwrap();

        assert_eq!(result.labour_cost, 0.5 * 20.0);
        assert_eq!(result.armour_cost, 160.0);
        assert_eq!(result.final_cost, result.base_cost() + result.labour_cost);
    }

    #[test]
    fn test_armour_cost_zero_without_armour() {
        let mut sheet = rates(LabourMode::Percentage, 0.0);
        sheet.armour_rate = 500.0;
        let result = cost_breakdown(0.5, 0.5, 0.0, &sheet).unwrap();
        assert_eq!(result.armour_cost, 0.0);
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let sheet = rates(LabourMode::Percentage, 4.0);
        let err = cost_breakdown(f64::NAN, 1.0, 0.0, &sheet).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(ref msg) if msg.contains("conductor_weight")));

        let mut bad_rate = sheet;
        bad_rate.pvc_rate = f64::INFINITY;
        let err = cost_breakdown(0.5, 1.0, 0.0, &bad_rate).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(ref msg) if msg.contains("pvc_rate")));
    }

    #[test]
    fn test_negative_rates_pass_through() {
        let mut sheet = rates(LabourMode::Percentage, 0.0);
        sheet.pvc_rate = -10.0;
        let result = cost_breakdown(0.0, 1.0, 0.0, &sheet).unwrap();
        assert_eq!(result.insulation_cost, -10.0);
    }

    #[test]
    fn test_components_skip_zero_lines() {
        let result = cost_breakdown(0.5, 0.0, 0.0, &rates(LabourMode::PerKg, 0.0)).unwrap();
        let components = result.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].label, "Conductor");
        assert_eq!(components[0].share(result.final_cost), 100.0);
    }

    #[test]
    fn test_components_order() {
        let mut sheet = rates(LabourMode::Percentage, 4.0);
        sheet.armour_rate = 60.0;
        let result = cost_breakdown(0.5, 1.0, 3.0, &sheet).unwrap();
        let labels: Vec<_> = result.components().iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Conductor", "Insulation", "Armour", "Labour"]);
    }

    #[test]
    fn test_labour_mode_parsing() {
        assert_eq!("percentage".parse::<LabourMode>().unwrap(), LabourMode::Percentage);
        assert_eq!(" Per_Kg ".parse::<LabourMode>().unwrap(), LabourMode::PerKg);
        assert_eq!("per-kg".parse::<LabourMode>().unwrap(), LabourMode::PerKg);

        let err = "hourly".parse::<LabourMode>().unwrap_err();
        assert!(matches!(err, CalcError::InvalidRateSheet(_)));
    }

    #[test]
    fn test_rate_sheet_serde_defaults_armour_rate() {
        let json = r#"{
            "pvc_rate": 120.0,
            "conductor_rate": 180.0,
            "labour_mode": "per_kg",
            "labour_value": 20.0
        }"#;
        let sheet: RateSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.armour_rate, 0.0);
        assert_eq!(sheet.labour_mode, LabourMode::PerKg);

        let bad = r#"{
            "pvc_rate": 120.0,
            "conductor_rate": 180.0,
            "labour_mode": "hourly",
            "labour_value": 20.0
        }"#;
        assert!(serde_json::from_str::<RateSheet>(bad).is_err());
    }

    #[test]
    fn test_estimate_house_wire() {
        let spec = ProductSpec {
            gauge: 9.5,
            strands: 14,
            length: 100.0,
            coil_weight: 1.2,
            category: Category::HouseWire,
        };
        let result = estimate(&spec, &RateSheet::default(), &WeightFactors::default()).unwrap();

        assert!((result.conductor_weight - 0.520562).abs() < 1e-9);
        assert!((result.insulation_weight - (1.2 - 0.520562)).abs() < 1e-9);
        assert_eq!(result.armour_weight, 0.0);
    }

    #[test]
    fn test_estimate_armoured_charges_armour_once() {
        let spec = ProductSpec {
            gauge: 9.5,
            strands: 14,
            length: 100.0,
            coil_weight: 9.0,
            category: Category::Armoured { armour_weight: 3.2 },
        };
        let sheet = RateSheet {
            armour_rate: 70.0,
            labour_mode: LabourMode::PerKg,
            labour_value: 18.0,
            ..RateSheet::default()
        };
        let result = estimate(&spec, &sheet, &WeightFactors::default()).unwrap();
        let metal = crate::weight::house_wire_weight(9.5, 14, 100.0);

        assert!((result.conductor_weight - metal).abs() < 1e-9);
        assert!((result.conductor_cost - metal * 950.0).abs() < 1e-9);
        assert_eq!(result.armour_weight, 3.2);
        assert!((result.armour_cost - 3.2 * 70.0).abs() < 1e-9);
        assert!((result.labour_cost - metal * 18.0).abs() < 1e-9);
        assert!((result.insulation_weight - (9.0 - metal - 3.2)).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_custom_matches_house_wire() {
        let mut spec = ProductSpec {
            gauge: 9.5,
            strands: 14,
            length: 100.0,
            coil_weight: 1.2,
            category: Category::HouseWire,
        };
        let factors = WeightFactors::default();
        let house = estimate(&spec, &RateSheet::default(), &factors).unwrap();
        spec.category = Category::Custom;
        let custom = estimate(&spec, &RateSheet::default(), &factors).unwrap();
        assert_eq!(house, custom);
    }

    #[test]
    fn test_estimate_rejects_nan_coil() {
        let spec = ProductSpec {
            gauge: 9.5,
            strands: 14,
            length: 100.0,
            coil_weight: f64::NAN,
            category: Category::HouseWire,
        };
        let err = estimate(&spec, &RateSheet::default(), &WeightFactors::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }
}
