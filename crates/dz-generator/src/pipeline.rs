//! One generation pass over a catalog snapshot

use tracing::{info, warn};

use dz_catalog::CatalogSnapshot;
use dz_config::GeneratorConfig;
use dz_core::{domains, slugify_name, DeviceRecord, EntityId};

use crate::context::{EntityList, GeneratedDocuments, GenerationContext};
use crate::entities::ConfigEntryBuilder;
use crate::error::GenerateResult;
use crate::groups::GroupDefinition;
use crate::kinds::{is_energy_meter, SensorKind, SwitchKind};
use crate::rules::TemplateRuleBuilder;
use crate::startup::priming_rule;
use crate::thermostat::ThermostatAssembler;

/// Build every output set from the fetched device lists
///
/// Rules are ordered lights, sensors, power, thermostats, then the startup
/// priming rule.
pub fn generate(
    snapshot: &CatalogSnapshot,
    config: &GeneratorConfig,
) -> GenerateResult<GeneratedDocuments> {
    let mut ctx = GenerationContext::new(config);

    generate_switches(&mut ctx, &snapshot.lights);
    generate_sensors(&mut ctx, &snapshot.temperature);
    generate_power(&mut ctx, &snapshot.utility);
    generate_thermostats(&mut ctx, &snapshot.all, ThermostatAssembler::new(config));
    generate_startup(&mut ctx, &snapshot.all);

    let documents = ctx.finish()?;
    info!(
        "Generated {} rules and {} documents",
        documents.rules().len(),
        documents.document_count()
    );
    Ok(documents)
}

/// Lights, dimmers, locks and contact sensors
pub fn generate_switches(ctx: &mut GenerationContext<'_>, devices: &[DeviceRecord]) {
    let rules = TemplateRuleBuilder::new(ctx.config().unit);
    let entries = ConfigEntryBuilder::new(ctx.config().unit);

    for device in devices {
        if ctx.is_ignored(device) {
            continue;
        }

        match SwitchKind::of(device) {
            Some(SwitchKind::BinarySensor { device_class }) => {
                ctx.add_rule(rules.binary_sensor(device));
                let entity = entries.binary_sensor(device, device_class);
                ctx.add_entity(EntityList::BinarySensor, entity.config);
                ctx.groups_mut().offer_sensor(entity.id);
            }
            Some(SwitchKind::Light { dimmable }) => {
                ctx.add_rule(rules.light(device));
                let entity = entries.light(device, dimmable);
                ctx.add_entity(EntityList::Light, entity.config);
                ctx.groups_mut().offer_light(entity.id);
                if dimmable {
                    ctx.add_rule(rules.dimmer(device));
                }
            }
            Some(SwitchKind::Lock) => {
                ctx.add_rule(rules.lock(device));
                let entity = entries.lock(device);
                ctx.add_entity(EntityList::Lock, entity.config);
                ctx.groups_mut().offer_sensor(entity.id);
            }
            None => info!(
                "Switch type '{}' of '{}' ({}) is not supported",
                device.switch_type, device.name, device.idx
            ),
        }
    }
}

/// Temperature, humidity, barometer and wind sensors
pub fn generate_sensors(ctx: &mut GenerationContext<'_>, devices: &[DeviceRecord]) {
    let rules = TemplateRuleBuilder::new(ctx.config().unit);
    let entries = ConfigEntryBuilder::new(ctx.config().unit);

    for device in devices {
        if ctx.is_ignored(device) {
            continue;
        }

        let Some(kind) = SensorKind::of(device) else {
            warn!(
                "Sensor type '{}' of '{}' ({}) is not supported",
                device.device_type, device.name, device.idx
            );
            continue;
        };

        ctx.add_rule(rules.sensor(device, kind));

        let entities = entries.sensors(device, kind);
        let ids: Vec<EntityId> = entities.iter().map(|e| e.id.clone()).collect();
        for entity in entities {
            ctx.add_entity(EntityList::Sensor, entity.config);
            ctx.groups_mut().offer_sensor(entity.id);
        }

        // Multi-reading devices get a group of their own, humidity first
        let grouped = match kind {
            SensorKind::Temp => None,
            SensorKind::TempHumidity | SensorKind::TempHumidityBaro => {
                let mut members = ids.clone();
                members.swap(0, 1);
                Some(members)
            }
            SensorKind::Wind => Some(ids),
        };
        if let Some(members) = grouped {
            ctx.groups_mut().claim(
                slugify_name(&device.name),
                GroupDefinition::new(device.name.as_str(), members),
            );
        }
    }
}

/// Energy meters with their cycle aggregates
pub fn generate_power(ctx: &mut GenerationContext<'_>, devices: &[DeviceRecord]) {
    let rules = TemplateRuleBuilder::new(ctx.config().unit);
    let entries = ConfigEntryBuilder::new(ctx.config().unit);

    for device in devices {
        if ctx.is_ignored(device) {
            continue;
        }
        if !is_energy_meter(device) {
            info!(
                "Utility '{}' ({}) reports '{}', not kWh; skipping",
                device.name, device.idx, device.subtype
            );
            continue;
        }

        ctx.add_rule(rules.power(device));

        let key = slugify_name(&device.name);
        let mut power_ids = Vec::with_capacity(2);
        for entity in entries.power(device) {
            ctx.add_entity(EntityList::Power, entity.config);
            power_ids.push(entity.id);
        }
        ctx.groups_mut()
            .claim(key.as_str(), GroupDefinition::new(device.name.as_str(), power_ids));

        let mut meter_ids = Vec::new();
        for (meter_key, config) in entries.utility_meters(device) {
            meter_ids.push(EntityId::from_name(domains::SENSOR, &meter_key));
            ctx.add_utility_meter(meter_key, config);
        }
        ctx.groups_mut().claim(
            format!("{key}_consumption"),
            GroupDefinition::new(format!("{} Consumption", device.name), meter_ids),
        );
    }
}

/// Climate entities reassembled from the unfiltered device listing
pub fn generate_thermostats(
    ctx: &mut GenerationContext<'_>,
    devices: &[DeviceRecord],
    assembler: ThermostatAssembler<'_>,
) {
    for thermostat in assembler.assemble(devices) {
        info!(
            "Thermostat '{}' (cluster {}) with {} rules",
            thermostat.name,
            thermostat.key,
            thermostat.rules.len()
        );
        ctx.add_entity(EntityList::Climate, thermostat.climate);
        for rule in thermostat.rules {
            ctx.add_rule(rule);
        }
    }
}

/// Startup priming over every device, used or not
pub fn generate_startup(ctx: &mut GenerationContext<'_>, devices: &[DeviceRecord]) {
    let primed: Vec<&DeviceRecord> = devices.iter().filter(|d| !ctx.is_ignored(d)).collect();
    if primed.is_empty() {
        info!("No devices to prime on startup");
        return;
    }
    ctx.add_rule(priming_rule(primed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dz_core::Artifact;
    use serde_yaml::Value;

    fn group_members(docs: &GeneratedDocuments, key: &str) -> Vec<String> {
        docs.keyed(Artifact::Group).unwrap()[key]
            .get("entities")
            .and_then(Value::as_sequence)
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    }

    #[test]
    fn test_sensor_named_sensors_stays_grouped() {
        let config = GeneratorConfig::default();
        let mut ctx = GenerationContext::new(&config);
        let devices = vec![DeviceRecord::new("30", "Sensors").with_type("Temp + Humidity")];
        generate_sensors(&mut ctx, &devices);
        let docs = ctx.finish().unwrap();

        let keys: Vec<&str> = docs
            .keyed(Artifact::Group)
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["sensors_2", "sensors", "lights"]);
        assert_eq!(
            group_members(&docs, "sensors_2"),
            vec!["sensor.sensors_humidity", "sensor.sensors_temperature"]
        );
        assert_eq!(group_members(&docs, "sensors"), vec!["group.sensors_2"]);
    }
}
