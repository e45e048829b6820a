//! Tool configuration
//!
//! Loaded from built-in defaults, then `wirecost.yaml` (or `--config`), then
//! `WIRECOST_*` environment variables.
//!
//! ```yaml
//! currency: "₹"
//! catalog: data/catalog.csv
//! log:
//!   level: info
//! factors:
//!   aluminium: 300.0
//! rates:
//!   pvc_rate: 130.0
//!   conductor_rate: 950.0
//!   labour_mode: percentage
//!   labour_value: 4.0
//! ```

use anyhow::{Context, Result};
use common::{load_layered, LogConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wire_calc::{RateSheet, WeightFactors};

pub const DEFAULT_CONFIG_FILE: &str = "wirecost.yaml";
pub const ENV_PREFIX: &str = "WIRECOST_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogConfig,
    /// Catalog CSV used by `compare` and `catalog`
    pub catalog: Option<PathBuf>,
    /// Currency label for reports
    pub currency: String,
    pub factors: WeightFactors,
    /// Default rates for `calc`
    pub rates: RateSheet,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            catalog: None,
            currency: "₹".to_string(),
            factors: WeightFactors::default(),
            rates: RateSheet::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration; an explicit `path` must exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        load_layered(path, Some(Path::new(DEFAULT_CONFIG_FILE)), ENV_PREFIX)
            .context("Failed to load wirecost configuration")
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use std::io::Write;
    use wire_calc::LabourMode;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "currency: USD\nfactors:\n  aluminium: 280.0\nrates:\n  pvc_rate: 120.0\n  conductor_rate: 180.0\n  labour_mode: per_kg\n  labour_value: 20.0"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.factors.aluminium, 280.0);
        assert_eq!(config.factors.house_wire, 412.0);
        assert_eq!(config.rates.labour_mode, LabourMode::PerKg);
        assert_eq!(config.rates.armour_rate, 0.0);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_unknown_labour_mode_in_config_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "rates:\n  pvc_rate: 120.0\n  conductor_rate: 180.0\n  labour_mode: hourly\n  labour_value: 20.0"
        )
        .unwrap();

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/wirecost.yaml"))).is_err());
    }
}
