//! Generator configuration
//!
//! Built from defaults, then an optional YAML file, then command-line flags.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dz_core::{Artifact, UnitSystem};

use crate::error::{ConfigError, ConfigResult};

/// Where one artifact is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub file: String,
}

impl OutputTarget {
    pub fn new(dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file: file.into(),
        }
    }

    /// Path of the output file, relative to `root` unless `dir` is absolute
    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(&self.dir).join(&self.file)
    }
}

/// Destination of every artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub automation: OutputTarget,
    pub binary_sensor: OutputTarget,
    pub climate: OutputTarget,
    pub group: OutputTarget,
    pub light: OutputTarget,
    pub lock: OutputTarget,
    pub power: OutputTarget,
    pub sensor: OutputTarget,
    pub utility_meter: OutputTarget,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            automation: OutputTarget::new("automation", "domoticz_automation.yaml"),
            binary_sensor: OutputTarget::new("binary_sensor", "domoticz_binary_sensor.yaml"),
            climate: OutputTarget::new("climate", "domoticz_climate.yaml"),
            group: OutputTarget::new("group", "domoticz_group.yaml"),
            light: OutputTarget::new("light", "domoticz_light.yaml"),
            lock: OutputTarget::new("lock", "domoticz_lock.yaml"),
            power: OutputTarget::new("sensor", "domoticz_power.yaml"),
            sensor: OutputTarget::new("sensor", "domoticz_sensor.yaml"),
            utility_meter: OutputTarget::new("utility_meter", "domoticz_power.yaml"),
        }
    }
}

impl OutputLayout {
    pub fn get(&self, artifact: Artifact) -> &OutputTarget {
        match artifact {
            Artifact::Automation => &self.automation,
            Artifact::BinarySensor => &self.binary_sensor,
            Artifact::Climate => &self.climate,
            Artifact::Group => &self.group,
            Artifact::Light => &self.light,
            Artifact::Lock => &self.lock,
            Artifact::Power => &self.power,
            Artifact::Sensor => &self.sensor,
            Artifact::UtilityMeter => &self.utility_meter,
        }
    }

    pub fn get_mut(&mut self, artifact: Artifact) -> &mut OutputTarget {
        match artifact {
            Artifact::Automation => &mut self.automation,
            Artifact::BinarySensor => &mut self.binary_sensor,
            Artifact::Climate => &mut self.climate,
            Artifact::Group => &mut self.group,
            Artifact::Light => &mut self.light,
            Artifact::Lock => &mut self.lock,
            Artifact::Power => &mut self.power,
            Artifact::Sensor => &mut self.sensor,
            Artifact::UtilityMeter => &mut self.utility_meter,
        }
    }

    /// Resolved path of every artifact, in reporting order
    pub fn resolve(&self, root: &Path) -> Vec<(Artifact, PathBuf)> {
        Artifact::ALL
            .iter()
            .map(|a| (*a, self.get(*a).path_under(root)))
            .collect()
    }
}

/// Complete configuration of one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Hub address, e.g. "192.168.1.5:8080"
    pub host: String,

    /// Unit preference for temperatures
    pub unit: UnitSystem,

    /// Devices whose hardware name is listed here are skipped everywhere
    pub ignore_hardware: Vec<String>,

    /// Thermostat cluster key → display name
    pub climate_names: IndexMap<String, String>,

    pub outputs: OutputLayout,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let mut climate_names = IndexMap::new();
        climate_names.insert("50".to_string(), "Downstairs Thermostat".to_string());
        climate_names.insert("40".to_string(), "Upstairs Thermostat".to_string());

        Self {
            host: "localhost:8080".to_string(),
            unit: UnitSystem::Imperial,
            ignore_hardware: vec!["Hue".to_string()],
            climate_names,
            outputs: OutputLayout::default(),
        }
    }
}

impl GeneratorConfig {
    /// Whether devices on this hardware are excluded from generation
    pub fn is_hardware_ignored(&self, hardware_name: &str) -> bool {
        self.ignore_hardware.iter().any(|h| h == hardware_name)
    }

    /// Display name override for a thermostat cluster
    pub fn climate_name(&self, cluster_key: &str) -> Option<&str> {
        self.climate_names.get(cluster_key).map(String::as_str)
    }

    /// Check values that would only fail later, mid-run
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "host".to_string(),
                reason: "hub host cannot be empty".to_string(),
            });
        }
        for artifact in Artifact::ALL {
            if self.outputs.get(artifact).file.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("outputs.{}", artifact.label().replace(' ', "_")),
                    reason: "file name cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse `id:name` pairs separated by commas, e.g. "50:Downstairs,40:Upstairs"
///
/// Whitespace around keys and names is trimmed; empty entries are skipped.
pub fn parse_name_overrides(input: &str) -> ConfigResult<IndexMap<String, String>> {
    let mut overrides = IndexMap::new();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, name) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidOverride {
                entry: entry.to_string(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidOverride {
                entry: entry.to_string(),
            });
        }
        overrides.insert(key.to_string(), name.trim().to_string());
    }
    Ok(overrides)
}

/// Parse a comma-separated list, dropping empty items
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
