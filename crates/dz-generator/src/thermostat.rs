//! Thermostat assembly
//!
//! A Z-Wave thermostat shows up on the hub as a family of devices sharing an
//! ID prefix: a mode control, a fan mode control, one or more setpoints, a
//! temperature sensor, an operating state report. The assembler regroups
//! them into one climate entity plus the rules bridging each sub-device's
//! topic to the climate entity's topics.

use indexmap::IndexSet;
use serde_yaml::Value;
use tracing::{debug, info, warn};

use dz_automation::template::{self, JsonPayload};
use dz_automation::{AutomationRule, Trigger};
use dz_config::GeneratorConfig;
use dz_core::{topics, DeviceRecord, Document};

use crate::mode_map::{ModeMap, ModeVocabulary};
use crate::roles::{RoleClassifier, RoleSlots};

/// Name used when no override exists for a cluster
pub const DEFAULT_THERMOSTAT_NAME: &str = "Thermostat";

/// Setpoint bounds, in the display unit
pub const MAX_TEMP: u32 = 78;
pub const MIN_TEMP: u32 = 52;

/// Hardware type marker of radio-mesh controllers
const MESH_HARDWARE: &str = "ZWave";

/// Fixed code table of operating state reports
const OPERATING_STATES: [(&str, &str); 3] = [("0", "off"), ("1", "cooling"), ("2", "heating")];

/// One reassembled thermostat
#[derive(Debug, Clone, PartialEq)]
pub struct Thermostat {
    pub key: String,
    pub name: String,
    pub climate: Document,
    pub rules: Vec<AutomationRule>,
}

/// Cluster key of a thermostat root device: the first two digits of its
/// zero-stripped hub ID
///
/// Only thermostats on mesh hardware are clustered.
pub fn cluster_key(device: &DeviceRecord) -> Option<String> {
    if device.device_type != "Thermostat" || !device.hardware_type.contains(MESH_HARDWARE) {
        return None;
    }
    let key: String = device.trimmed_id().chars().take(2).collect();
    if key.is_empty() {
        warn!("Thermostat '{}' ({}) has no usable ID", device.name, device.idx);
        return None;
    }
    Some(key)
}

/// Drives role inference and mode parsing for every cluster
pub struct ThermostatAssembler<'c> {
    config: &'c GeneratorConfig,
    classifier: RoleClassifier,
}

impl<'c> ThermostatAssembler<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            classifier: RoleClassifier::default(),
        }
    }

    /// Replace the default role table
    pub fn with_classifier(mut self, classifier: RoleClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Cluster keys in the order their first root device appears
    pub fn cluster_keys(&self, devices: &[DeviceRecord]) -> Vec<String> {
        let keys: IndexSet<String> = devices
            .iter()
            .filter(|d| !self.config.is_hardware_ignored(&d.hardware_name))
            .filter_map(cluster_key)
            .collect();
        keys.into_iter().collect()
    }

    /// Devices whose zero-stripped ID starts with `key`
    pub fn members<'d>(&self, key: &str, devices: &'d [DeviceRecord]) -> Vec<&'d DeviceRecord> {
        devices
            .iter()
            .filter(|d| d.trimmed_id().starts_with(key))
            .filter(|d| !self.config.is_hardware_ignored(&d.hardware_name))
            .collect()
    }

    /// Assemble every thermostat found in an unfiltered device listing
    pub fn assemble(&self, devices: &[DeviceRecord]) -> Vec<Thermostat> {
        self.cluster_keys(devices)
            .into_iter()
            .map(|key| {
                let members = self.members(&key, devices);
                self.assemble_cluster(&key, &members)
            })
            .collect()
    }

    /// Build one climate entity and its rules from a cluster's members
    pub fn assemble_cluster(&self, key: &str, members: &[&DeviceRecord]) -> Thermostat {
        let name = self
            .config
            .climate_name(key)
            .unwrap_or(DEFAULT_THERMOSTAT_NAME)
            .to_string();
        let slots = self.classifier.assign(members);
        if slots.is_empty() {
            info!("Thermostat '{}' (cluster {}) has no recognized sub-devices", name, key);
        }

        let mut build = ClusterBuild::new(&name, self.config.unit.conversion_suffix());
        build.wire(&slots);

        debug!(
            "Assembled thermostat '{}' from {} devices into {} rules",
            name,
            members.len(),
            build.rules.len()
        );

        Thermostat {
            key: key.to_string(),
            name,
            climate: build.climate,
            rules: build.rules,
        }
    }
}

/// Climate document and rules under construction for one cluster
struct ClusterBuild<'a> {
    conversion: &'a str,
    climate: Document,
    rules: Vec<AutomationRule>,
}

impl<'a> ClusterBuild<'a> {
    fn new(name: &str, conversion: &'a str) -> Self {
        let climate = Document::new()
            .with("platform", "mqtt")
            .with("name", name)
            .with("send_if_off", true);
        Self {
            conversion,
            climate,
            rules: Vec::new(),
        }
    }

    fn wire(&mut self, slots: &RoleSlots<'_>) {
        if let Some(device) = slots.temperature {
            self.temperature(&device.idx);
        }
        if let Some(device) = slots.setpoint {
            self.setpoint(&device.idx);
        }
        if let Some(device) = slots.mode {
            let modes = parse_modes(device, ModeVocabulary::Thermostat);
            self.modes(&device.idx, &modes, "mode_state_topic", "mode_command_topic", "modes");
        }
        if let Some(device) = slots.operating_state {
            self.operating_state(&device.idx);
        }
        if let Some(device) = slots.fan_mode {
            let modes = parse_modes(device, ModeVocabulary::Fan);
            self.modes(
                &device.idx,
                &modes,
                "fan_mode_state_topic",
                "fan_mode_command_topic",
                "fan_modes",
            );
        }
    }

    /// Current temperature, converted to the display unit
    fn temperature(&mut self, idx: &str) {
        let topic = topics::climate_state(idx, "temp");
        self.climate.insert("current_temperature_topic", topic.as_str());

        let payload = template::interpolate(&template::float_field("svalue1", self.conversion));
        self.rules.push(
            AutomationRule::on_hub_update(format!("{idx}_climate_temp"), idx).publish(topic, payload),
        );
    }

    /// Heating setpoint: state report plus inbound command
    fn setpoint(&mut self, idx: &str) {
        let state_topic = topics::climate_state(idx, "target");
        let command_topic = topics::climate_command(idx, "set");
        self.climate.insert("temperature_state_topic", state_topic.as_str());
        self.climate.insert("temperature_command_topic", command_topic.as_str());
        self.climate.insert("max_temp", MAX_TEMP);
        self.climate.insert("min_temp", MIN_TEMP);

        // A converted value above the maximum means the hub already reports
        // in the display unit, so the raw value is passed through.
        let payload = [
            template::set("max_temp", &MAX_TEMP.to_string()),
            template::set("ctof", &template::float_field("svalue1", self.conversion)),
            template::if_else(
                "ctof > max_temp",
                &template::interpolate(&template::float_field("svalue1", "")),
                &template::interpolate("ctof"),
            ),
        ]
        .concat();
        self.rules.push(
            AutomationRule::on_hub_update(format!("{idx}_target_temp"), idx)
                .publish(state_topic, payload),
        );

        // The hub's setpoint command takes the display unit: no reconversion
        let command = JsonPayload::new()
            .raw("idx", idx)
            .quoted_expr("svalue", template::PAYLOAD_JSON)
            .build();
        self.rules.push(
            AutomationRule::new(format!("{idx}_target_temp_set"), Trigger::mqtt(command_topic))
                .publish(topics::HUB_IN, command),
        );
    }

    /// Mode-like control: code → label state rule and label → code command rule
    fn modes(
        &mut self,
        idx: &str,
        modes: &ModeMap,
        state_field: &str,
        command_field: &str,
        list_field: &str,
    ) {
        let state_topic = topics::climate_state(idx, "mode");
        let command_topic = topics::climate_command(idx, "mode");
        let labels: Vec<Value> = modes.labels().map(Value::from).collect();
        self.climate.insert(state_field, state_topic.as_str());
        self.climate.insert(command_field, command_topic.as_str());
        self.climate.insert(list_field, labels);

        let state = template::with_lookup(
            modes.code_to_label(),
            &template::interpolate(&template::lookup(&format!(
                "{}|string",
                template::field("nvalue")
            ))),
        );
        self.rules.push(
            AutomationRule::on_hub_update(format!("{idx}_state"), idx).publish(state_topic, state),
        );

        let command = template::with_lookup(
            modes.label_to_code(),
            &JsonPayload::new()
                .raw("idx", idx)
                .expr("nvalue", &template::lookup(template::PAYLOAD_RAW))
                .build(),
        );
        self.rules.push(
            AutomationRule::new(format!("{idx}_state_set"), Trigger::mqtt(command_topic))
                .publish(topics::HUB_IN, command),
        );
    }

    /// Operating state report through the fixed off/cooling/heating table
    fn operating_state(&mut self, idx: &str) {
        let topic = topics::climate_state(idx, "action");
        self.climate.insert("action_topic", topic.as_str());

        let payload = template::with_lookup(
            OPERATING_STATES,
            &template::interpolate(&template::lookup(&format!(
                "{}|string",
                template::field("nvalue")
            ))),
        );
        self.rules.push(
            AutomationRule::on_hub_update(format!("{idx}_action"), idx).publish(topic, payload),
        );
    }
}

fn parse_modes(device: &DeviceRecord, vocabulary: ModeVocabulary) -> ModeMap {
    match device.modes.as_deref() {
        Some(modes) => ModeMap::parse(modes, vocabulary),
        None => {
            warn!("Mode control '{}' ({}) reports no modes", device.name, device.idx);
            ModeMap::default()
        }
    }
}
