//! Standard vs custom comparison
//!
//! A comparison is two independent engine runs; this module only pairs the
//! results and computes the final-cost difference.

use serde::Serialize;

use crate::cost::CostBreakdown;

/// Percentage difference of `custom_final` against `standard_final`
///
/// Returns `NaN` when `standard_final` is 0.
pub fn percent_difference(standard_final: f64, custom_final: f64) -> f64 {
    if standard_final == 0.0 {
        return f64::NAN;
    }
    (custom_final - standard_final) / standard_final * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub standard: CostBreakdown,
    pub custom: CostBreakdown,
}

impl Comparison {
    pub fn new(standard: CostBreakdown, custom: CostBreakdown) -> Self {
        Self { standard, custom }
    }

    pub fn difference_pct(&self) -> f64 {
        percent_difference(self.standard.final_cost, self.custom.final_cost)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::cost::{cost_breakdown, LabourMode, RateSheet};

    #[test]
    fn test_percent_difference() {
        assert_eq!(percent_difference(100.0, 120.0), 20.0);
        assert_eq!(percent_difference(100.0, 80.0), -20.0);
        assert_eq!(percent_difference(50.0, 50.0), 0.0);
    }

    #[test]
    fn test_zero_standard_is_nan() {
        assert!(percent_difference(0.0, 120.0).is_nan());
        assert!(percent_difference(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_comparison_difference() {
        let sheet = RateSheet {
            pvc_rate: 0.0,
            conductor_rate: 100.0,
            armour_rate: 0.0,
            labour_mode: LabourMode::PerKg,
            labour_value: 0.0,
        };
        let standard = cost_breakdown(1.0, 0.0, 0.0, &sheet).unwrap();
        let custom = cost_breakdown(1.5, 0.0, 0.0, &sheet).unwrap();

        let comparison = Comparison::new(standard, custom);
        assert_eq!(comparison.difference_pct(), 50.0);
    }
}
