//! Device records as returned by the hub's device-listing API

use serde::{Deserialize, Serialize};
use std::fmt;

/// One device as reported by the hub
///
/// Field names follow the hub's JSON keys. Only `idx` and `Name` are always
/// present; everything else defaults to an empty string when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Hub identifier, possibly zero-padded (e.g. "00005001")
    #[serde(rename = "ID", default)]
    pub id: String,

    /// Stable numeric reference used in topics and rule conditions
    pub idx: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Type", default)]
    pub device_type: String,

    #[serde(rename = "SubType", default)]
    pub subtype: String,

    #[serde(rename = "SwitchType", default)]
    pub switch_type: String,

    #[serde(rename = "HardwareName", default)]
    pub hardware_name: String,

    #[serde(rename = "HardwareType", default)]
    pub hardware_type: String,

    /// Semicolon-delimited alternating code/label string
    #[serde(rename = "Modes", default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<String>,
}

impl DeviceRecord {
    /// Create a record with just the identifying fields set
    pub fn new(idx: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            idx: idx.into(),
            name: name.into(),
            device_type: String::new(),
            subtype: String::new(),
            switch_type: String::new(),
            hardware_name: String::new(),
            hardware_type: String::new(),
            modes: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_switch_type(mut self, switch_type: impl Into<String>) -> Self {
        self.switch_type = switch_type.into();
        self
    }

    pub fn with_hardware(mut self, name: impl Into<String>, hw_type: impl Into<String>) -> Self {
        self.hardware_name = name.into();
        self.hardware_type = hw_type.into();
        self
    }

    pub fn with_modes(mut self, modes: impl Into<String>) -> Self {
        self.modes = Some(modes.into());
        self
    }

    /// The hub ID with leading zeros stripped
    pub fn trimmed_id(&self) -> &str {
        self.id.trim_start_matches('0')
    }
}

/// Device-type filter understood by the hub's listing API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFilter {
    Light,
    Temp,
    Utility,
    All,
}

impl DeviceFilter {
    /// Value of the `filter` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceFilter::Light => "light",
            DeviceFilter::Temp => "temp",
            DeviceFilter::Utility => "utility",
            DeviceFilter::All => "all",
        }
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
