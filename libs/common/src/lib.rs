//! Shared basics for the wire costing tools
//!
//! - logging setup (tracing)
//! - layered configuration loading (figment)

pub mod config_loader;
pub mod logging;

pub use config_loader::{load_layered, ConfigError};
pub use logging::LogConfig;
