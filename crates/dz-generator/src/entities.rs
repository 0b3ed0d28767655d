//! Entity configuration documents
//!
//! Field order in every document is the order the platform's own examples
//! list them in and is preserved by the emitter.

use dz_automation::template::{self, JsonPayload};
use dz_core::{domains, slugify_name, topics, DeviceRecord, Document, EntityId, UnitSystem};

use crate::kinds::SensorKind;
use crate::rules::BRIGHTNESS_SCALE;

/// Aggregation periods of the energy meters derived from each kWh sensor
pub const METER_CYCLES: [&str; 5] = ["hourly", "daily", "weekly", "monthly", "quarterly"];

/// A generated entity and the id the platform will give it
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub config: Document,
}

/// `switchlight` command for the hub
fn switch_command(idx: &str, switchcmd: &str) -> String {
    JsonPayload::new()
        .string("command", "switchlight")
        .raw("idx", idx)
        .string("switchcmd", switchcmd)
        .build()
}

/// Dimmer "on" command: Set Level when the platform sends a brightness, plain On otherwise
fn dimmer_on_command(idx: &str) -> String {
    let level = template::interpolate(&format!("(brightness / {BRIGHTNESS_SCALE})|round|int"));
    format!(
        "{{\"command\": \"switchlight\", \"idx\": {idx}, \
         {{%- if brightness is defined -%}}\"switchcmd\": \"Set Level\", \"level\": {level}\
         {{%- else -%}}\"switchcmd\": \"On\"{{%- endif -%}} }}"
    )
}

/// Builds the declarative document for each generated entity
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigEntryBuilder {
    unit: UnitSystem,
}

impl ConfigEntryBuilder {
    pub fn new(unit: UnitSystem) -> Self {
        Self { unit }
    }

    pub fn light(&self, device: &DeviceRecord, dimmable: bool) -> Entity {
        let on_command = if dimmable {
            dimmer_on_command(&device.idx)
        } else {
            switch_command(&device.idx, "On")
        };

        let mut config = Document::new()
            .with("name", device.name.as_str())
            .with("platform", "mqtt")
            .with("schema", "template")
            .with("command_topic", topics::HUB_IN)
            .with("state_topic", topics::entity_status(&device.idx, "light"))
            .with("state_template", "{{ value_json.state }}")
            .with("command_off_template", switch_command(&device.idx, "Off"))
            .with("command_on_template", on_command);
        if dimmable {
            config.insert("brightness_template", "{{ value_json.brightness|int }}");
        }

        Entity {
            id: EntityId::from_name(domains::LIGHT, &device.name),
            config,
        }
    }

    pub fn lock(&self, device: &DeviceRecord) -> Entity {
        let config = Document::new()
            .with("name", device.name.as_str())
            .with("platform", "mqtt")
            .with("command_topic", topics::HUB_IN)
            .with("payload_lock", switch_command(&device.idx, "On"))
            .with("payload_unlock", switch_command(&device.idx, "Off"))
            .with("state_topic", topics::entity_status(&device.idx, "lock"))
            .with("state_locked", "LOCK")
            .with("state_unlocked", "UNLOCK")
            .with("value_template", "{{ value_json.state }}");

        Entity {
            id: EntityId::from_name(domains::LOCK, &device.name),
            config,
        }
    }

    pub fn binary_sensor(&self, device: &DeviceRecord, device_class: &str) -> Entity {
        let config = Document::new()
            .with("name", device.name.as_str())
            .with("platform", "mqtt")
            .with("state_topic", topics::entity_status(&device.idx, "sensor"))
            .with("device_class", device_class);

        Entity {
            id: EntityId::from_name(domains::BINARY_SENSOR, &device.name),
            config,
        }
    }

    /// One sensor reading `field` out of the device's status payload
    fn reading(&self, device: &DeviceRecord, field: &str, unit: &str) -> Entity {
        let name = format!("{}_{field}", device.name);
        let config = Document::new()
            .with("name", name.as_str())
            .with("platform", "mqtt")
            .with("state_topic", topics::entity_status(&device.idx, "sensor"))
            .with("unit_of_measurement", unit)
            .with("value_template", format!("{{{{ value_json.{field} }}}}"));

        Entity {
            id: EntityId::from_name(domains::SENSOR, &name),
            config,
        }
    }

    /// Every reading a climate sensor reports, in payload order
    pub fn sensors(&self, device: &DeviceRecord, kind: SensorKind) -> Vec<Entity> {
        let temperature_unit = self.unit.temperature_unit();
        let mut entities = Vec::new();

        if kind.has_temperature() {
            entities.push(self.reading(device, "temperature", temperature_unit));
        }
        if kind.has_humidity() {
            entities.push(self.reading(device, "humidity", "%"));
        }
        if kind.has_barometer() {
            entities.push(self.reading(device, "barometer", "hPa"));
        }
        if kind == SensorKind::Wind {
            entities.push(self.reading(device, "windspeed", "speed"));
            entities.push(self.reading(device, "windgust", "gust"));
            entities.push(self.reading(device, "windchill", temperature_unit));
            entities.push(self.reading(device, "direction", "dir"));
        }

        entities
    }

    /// Energy counter and instantaneous power of an energy meter
    pub fn power(&self, device: &DeviceRecord) -> [Entity; 2] {
        [
            self.reading(device, "kwh", "kwh"),
            self.reading(device, "watts", "watts"),
        ]
    }

    /// Cycle meters fed by the device's kWh sensor, keyed `<name>_<cycle>_energy`
    pub fn utility_meters(&self, device: &DeviceRecord) -> Vec<(String, Document)> {
        let key = slugify_name(&device.name);
        let source = format!("{}.{key}_kwh", domains::SENSOR);

        METER_CYCLES
            .iter()
            .map(|cycle| {
                let config = Document::new()
                    .with("source", source.as_str())
                    .with("cycle", *cycle);
                (format!("{key}_{cycle}_energy"), config)
            })
            .collect()
    }
}
