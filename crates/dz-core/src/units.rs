//! Unit preference for generated temperature values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit system the generated entities present temperatures in
///
/// The hub always reports Celsius. With [`UnitSystem::Imperial`] every
/// temperature payload template converts on the platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Unit label attached to temperature sensors
    pub fn temperature_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }

    /// Template expression suffix that converts a Celsius float, if needed
    pub fn conversion_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "",
            UnitSystem::Imperial => " * 1.8 + 32",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(UnitSystem::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{other}'")),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}
