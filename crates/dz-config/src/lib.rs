//! Configuration for the Domoticz to Home Assistant generator
//!
//! Holds everything a run needs beyond the device list itself: the hub
//! address, the unit preference, the hardware ignore list, thermostat name
//! overrides, and where each artifact is written.
//!
//! # Example
//!
//! ```ignore
//! use dz_config::{load_config, GeneratorConfig};
//!
//! // Built-in defaults
//! let config = GeneratorConfig::default();
//!
//! // Or from a YAML file, any key optional
//! let config = load_config("dz-hass-gen.yaml")?;
//! ```

mod config;
mod error;
mod loader;

pub use config::{parse_list, parse_name_overrides, GeneratorConfig, OutputLayout, OutputTarget};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str};
