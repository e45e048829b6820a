//! Layered configuration loading
//!
//! Priority (highest first): environment > YAML file > built-in defaults.
//! Nested keys in the environment are separated by a double underscore, so
//! `WIRECOST_LOG__LEVEL=debug` sets `log.level`.

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Build the provider stack without extracting it
///
/// A `file` that does not exist is skipped silently; use [`load_layered`]
/// when an explicitly requested file must exist.
pub fn figment_for<T: Serialize + Default>(file: Option<&Path>, env_prefix: &str) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(T::default()));

    if let Some(path) = file {
        debug!("Merging configuration file {}", path.display());
        figment = figment.merge(Yaml::file(path));
    }

    figment.merge(Env::prefixed(env_prefix).split("__"))
}

/// Load a configuration struct from defaults, an optional YAML file and
/// prefixed environment variables
///
/// # Arguments
/// * `file` - Explicit config file; must exist when given
/// * `fallback` - Config file used when `file` is `None`, skipped if absent
/// * `env_prefix` - Environment prefix including the trailing underscore
pub fn load_layered<T>(
    file: Option<&Path>,
    fallback: Option<&Path>,
    env_prefix: &str,
) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let source = match (file, fallback) {
        (Some(path), _) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        (Some(path), _) => Some(path),
        (None, Some(path)) if path.exists() => Some(path),
        _ => None,
    };

    match source {
        Some(path) => info!("Using configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults and environment"),
    }

    figment_for::<T>(source, env_prefix)
        .extract()
        .map_err(|e| ConfigError::Extract(Box::new(e)))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        rate: f64,
        nested: Nested,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Nested {
        level: String,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                rate: 1.0,
                nested: Nested::default(),
            }
        }
    }

    impl Default for Nested {
        fn default() -> Self {
            Self {
                level: "warn".to_string(),
            }
        }
    }

    #[test]
    fn test_defaults_without_sources() {
        let loaded: Sample = load_layered(None, None, "CFGTEST_NONE_").unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: from-file\nnested:\n  level: info").unwrap();

        let loaded: Sample = load_layered(Some(file.path()), None, "CFGTEST_YAML_").unwrap();
        assert_eq!(loaded.name, "from-file");
        assert_eq!(loaded.rate, 1.0);
        assert_eq!(loaded.nested.level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rate: 2.5").unwrap();
        std::env::set_var("CFGTEST_ENV_RATE", "7.5");
        std::env::set_var("CFGTEST_ENV_NESTED__LEVEL", "debug");

        let loaded: Sample = load_layered(Some(file.path()), None, "CFGTEST_ENV_").unwrap();
        assert_eq!(loaded.rate, 7.5);
        assert_eq!(loaded.nested.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result: Result<Sample, _> =
            load_layered(Some(Path::new("/nonexistent/wirecost.yaml")), None, "CFGTEST_MISS_");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_missing_fallback_is_skipped() {
        let loaded: Sample = load_layered(
            None,
            Some(Path::new("/nonexistent/wirecost.yaml")),
            "CFGTEST_FALLBACK_",
        )
        .unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_bad_yaml_type_is_extract_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rate: fast").unwrap();

        let result: Result<Sample, _> = load_layered(Some(file.path()), None, "CFGTEST_BAD_");
        assert!(matches!(result, Err(ConfigError::Extract(_))));
    }
}
