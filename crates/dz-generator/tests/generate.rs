//! End-to-end generation over canned hub listings

mod common;

use serde_json::json;
use serde_yaml::Value;

use common::{condition_holds, fixture_snapshot, render_json, render_trigger, render_with};
use dz_config::GeneratorConfig;
use dz_core::{Artifact, UnitSystem};
use dz_generator::{generate, GeneratedDocuments};

fn generate_with(config: &GeneratorConfig) -> GeneratedDocuments {
    generate(&fixture_snapshot(), config).expect("generation failed")
}

fn aliases(docs: &GeneratedDocuments) -> Vec<&str> {
    docs.rules().iter().map(|r| r.alias.as_str()).collect()
}

fn names(docs: &GeneratedDocuments, artifact: Artifact) -> Vec<&str> {
    docs.list(artifact)
        .iter()
        .filter_map(|d| d.get_str("name"))
        .collect()
}

fn group_entities(docs: &GeneratedDocuments, key: &str) -> Vec<String> {
    let groups = docs.keyed(Artifact::Group).expect("groups are keyed");
    groups[key]
        .get("entities")
        .and_then(Value::as_sequence)
        .expect("group has entities")
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect()
}

#[test]
fn test_rule_order() {
    let docs = generate_with(&GeneratorConfig::default());

    assert_eq!(
        aliases(&docs),
        vec![
            // lights listing
            "16_sensor",
            "14_lock",
            "13_light",
            "13_dimmer",
            "15_sensor",
            "12_light",
            // temperature listing
            "30_sensor",
            "31_sensor",
            "33_sensor",
            "32_sensor",
            // utility listing
            "40_kwh_sensor",
            // downstairs thermostat
            "116_climate_temp",
            "114_target_temp",
            "114_target_temp_set",
            "112_state",
            "112_state_set",
            "117_action",
            "113_state",
            "113_state_set",
            // upstairs thermostat
            "120_state",
            "120_state_set",
            "prime_domoticz_devices",
        ]
    );
    assert_eq!(docs.list(Artifact::Automation).len(), docs.rules().len());
}

#[test]
fn test_hub_topic_rules_are_scoped() {
    let docs = generate_with(&GeneratorConfig::default());

    for rule in docs.rules() {
        match rule.trigger.topic() {
            Some("domoticz/out") => {
                let idx = rule.alias.split('_').next().unwrap();
                assert!(rule.is_scoped_to(idx), "{} is not scoped to {}", rule.alias, idx);
            }
            Some(topic) => {
                assert!(topic.starts_with("domoticz/in/climate/"), "{}", rule.alias);
                assert!(rule.condition.is_empty());
            }
            None => assert_eq!(rule.alias, "prime_domoticz_devices"),
        }
    }
}

#[test]
fn test_entity_sets() {
    let docs = generate_with(&GeneratorConfig::default());

    assert_eq!(names(&docs, Artifact::Light), vec!["Hall Dimmer", "Porch Light"]);
    assert_eq!(names(&docs, Artifact::Lock), vec!["Front Door"]);
    assert_eq!(names(&docs, Artifact::BinarySensor), vec!["Back Door", "Kitchen Motion"]);
    assert_eq!(
        names(&docs, Artifact::Sensor),
        vec![
            "Attic_temperature",
            "Porch_temperature",
            "Porch_humidity",
            "Roof_windspeed",
            "Roof_windgust",
            "Roof_windchill",
            "Roof_direction",
            "Weather Station_temperature",
            "Weather Station_humidity",
            "Weather Station_barometer",
        ]
    );
    assert_eq!(
        names(&docs, Artifact::Power),
        vec!["Clothes Dryer_kwh", "Clothes Dryer_watts"]
    );
    assert_eq!(
        names(&docs, Artifact::Climate),
        vec!["Downstairs Thermostat", "Upstairs Thermostat"]
    );

    let meters = docs.keyed(Artifact::UtilityMeter).unwrap();
    assert_eq!(meters.len(), 5);
    assert!(meters.contains_key("clothes_dryer_monthly_energy"));
}

#[test]
fn test_ignored_hardware_produces_nothing() {
    let docs = generate_with(&GeneratorConfig::default());

    // "Living Room Lamp" (idx 17) sits on the ignored Hue bridge
    assert!(!aliases(&docs).iter().any(|a| a.starts_with("17_")));
    for (_, set) in docs.iter() {
        let yaml = serde_yaml::to_string(set).unwrap();
        assert!(!yaml.contains("Living Room Lamp"));
        assert!(!yaml.contains("living_room_lamp"));
        assert!(!yaml.contains("\"idx\": 17 "));
    }

    let prime = docs.rules().last().unwrap();
    assert_eq!(prime.action.len(), 20);
}

#[test]
fn test_ignoring_zwave_drops_thermostats() {
    let config = GeneratorConfig {
        ignore_hardware: vec!["Z-Stick".to_string()],
        ..GeneratorConfig::default()
    };
    let docs = generate_with(&config);

    assert!(docs.list(Artifact::Climate).is_empty());
    // With Hue no longer ignored, its lamp is the only light left
    assert_eq!(names(&docs, Artifact::Light), vec!["Living Room Lamp"]);
    assert!(!aliases(&docs).iter().any(|a| a.starts_with("11")));
}

#[test]
fn test_every_entity_in_exactly_one_group() {
    let docs = generate_with(&GeneratorConfig::default());
    let groups = docs.keyed(Artifact::Group).unwrap();

    assert_eq!(
        groups.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "porch",
            "roof",
            "weather_station",
            "clothes_dryer",
            "clothes_dryer_consumption",
            "sensors",
            "lights"
        ]
    );

    let mut entities: Vec<String> = Vec::new();
    for (domain, artifact) in [
        ("light", Artifact::Light),
        ("lock", Artifact::Lock),
        ("binary_sensor", Artifact::BinarySensor),
        ("sensor", Artifact::Sensor),
        ("sensor", Artifact::Power),
    ] {
        for name in names(&docs, artifact) {
            entities.push(format!("{domain}.{}", dz_core::slugify_name(name)));
        }
    }
    for key in docs.keyed(Artifact::UtilityMeter).unwrap().keys() {
        entities.push(format!("sensor.{key}"));
    }

    for entity in &entities {
        let count = groups
            .keys()
            .filter(|key| group_entities(&docs, key).contains(entity))
            .count();
        assert_eq!(count, 1, "{entity} appears in {count} groups");
    }

    assert_eq!(
        group_entities(&docs, "sensors"),
        vec![
            "binary_sensor.back_door",
            "lock.front_door",
            "binary_sensor.kitchen_motion",
            "sensor.attic_temperature",
            "group.porch",
            "group.roof",
            "group.weather_station",
            "group.clothes_dryer",
            "group.clothes_dryer_consumption",
        ]
    );
    assert_eq!(
        group_entities(&docs, "porch"),
        vec!["sensor.porch_humidity", "sensor.porch_temperature"]
    );
    assert_eq!(
        group_entities(&docs, "lights"),
        vec!["light.hall_dimmer", "light.porch_light"]
    );
}

#[test]
fn test_downstairs_climate_document() {
    let docs = generate_with(&GeneratorConfig::default());
    let climate = &docs.list(Artifact::Climate)[0];

    assert_eq!(
        climate.keys().collect::<Vec<_>>(),
        vec![
            "platform",
            "name",
            "send_if_off",
            "current_temperature_topic",
            "temperature_state_topic",
            "temperature_command_topic",
            "max_temp",
            "min_temp",
            "mode_state_topic",
            "mode_command_topic",
            "modes",
            "action_topic",
            "fan_mode_state_topic",
            "fan_mode_command_topic",
            "fan_modes",
        ]
    );
    assert_eq!(
        climate.get_str("current_temperature_topic"),
        Some("domoticz/out/climate/116/temp")
    );

    let modes: Vec<&str> = climate
        .get("modes")
        .and_then(Value::as_sequence)
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(modes, vec!["off", "heat", "cool", "auto", "fan_only"]);
}

#[test]
fn test_thermostat_templates_render() {
    let docs = generate_with(&GeneratorConfig::default());
    let rule = |alias: &str| {
        docs.rules()
            .iter()
            .find(|r| r.alias == alias)
            .unwrap_or_else(|| panic!("no rule {alias}"))
            .action[0]
            .payload_template()
            .to_string()
    };

    // Celsius from the hub becomes Fahrenheit
    let temp: f64 = render_trigger(&rule("116_climate_temp"), r#"{"idx": 116, "svalue1": "20"}"#)
        .parse()
        .unwrap();
    assert!((temp - 68.0).abs() < 1e-9);

    // Converted setpoint within range is used; above range the raw value passes through
    let target = rule("114_target_temp");
    let converted: f64 = render_trigger(&target, r#"{"svalue1": "21"}"#).parse().unwrap();
    assert!((converted - 69.8).abs() < 1e-9);
    let raw: f64 = render_trigger(&target, r#"{"svalue1": "68"}"#).parse().unwrap();
    assert!((raw - 68.0).abs() < 1e-9);

    // Setpoint command is forwarded without conversion
    let set = render_json(&rule("114_target_temp_set"), "70");
    assert_eq!(set, json!({"idx": 114, "svalue": "70"}));

    // Mode codes and labels map both ways
    assert_eq!(render_trigger(&rule("112_state"), r#"{"nvalue": 5}"#), "fan_only");
    assert_eq!(
        render_json(&rule("112_state_set"), "cool"),
        json!({"idx": 112, "nvalue": 2})
    );

    assert_eq!(render_trigger(&rule("117_action"), r#"{"nvalue": 2}"#), "heating");

    assert_eq!(render_trigger(&rule("113_state"), r#"{"nvalue": 6}"#), "circulate");
    assert_eq!(
        render_json(&rule("113_state_set"), "on low"),
        json!({"idx": 113, "nvalue": 1})
    );
}

#[test]
fn test_metric_passes_temperatures_through() {
    let config = GeneratorConfig {
        unit: UnitSystem::Metric,
        ..GeneratorConfig::default()
    };
    let docs = generate_with(&config);
    let rule = docs.rules().iter().find(|r| r.alias == "31_sensor").unwrap();

    let payload = render_json(
        rule.action[0].payload_template(),
        r#"{"idx": 31, "svalue1": "21.5", "svalue2": "40"}"#,
    );
    assert_eq!(payload, json!({"temperature": 21.5, "humidity": 40}));

    let units: Vec<&str> = docs
        .list(Artifact::Sensor)
        .iter()
        .filter(|d| d.get_str("name").is_some_and(|n| n.ends_with("_temperature")))
        .filter_map(|d| d.get_str("unit_of_measurement"))
        .collect();
    assert!(units.iter().all(|u| *u == "C"));
}

#[test]
fn test_switch_templates_render() {
    let docs = generate_with(&GeneratorConfig::default());
    let rule = |alias: &str| docs.rules().iter().find(|r| r.alias == alias).unwrap();

    let dimmer = rule("13_dimmer");
    assert!(condition_holds(
        dimmer.condition[1].value_template(),
        r#"{"idx": 13, "nvalue": 2}"#
    ));
    assert!(!condition_holds(
        dimmer.condition[1].value_template(),
        r#"{"idx": 13, "nvalue": 1}"#
    ));
    assert_eq!(
        render_json(
            dimmer.action[0].payload_template(),
            r#"{"idx": 13, "nvalue": 2, "svalue1": "40"}"#
        ),
        json!({"state": "on", "brightness": 102})
    );

    let light = rule("12_light").action[0].payload_template();
    assert_eq!(render_json(light, r#"{"nvalue": 0}"#), json!({"state": "off"}));
    assert_eq!(render_json(light, r#"{"nvalue": 1}"#), json!({"state": "on"}));

    let lock = rule("14_lock").action[0].payload_template();
    assert_eq!(render_json(lock, r#"{"nvalue": 1}"#), json!({"state": "LOCK"}));
    assert_eq!(render_json(lock, r#"{"nvalue": 0}"#), json!({"state": "UNLOCK"}));

    let motion = rule("15_sensor").action[0].payload_template();
    assert_eq!(render_trigger(motion, r#"{"nvalue": 1}"#), "ON");

    let power = render_json(
        rule("40_kwh_sensor").action[0].payload_template(),
        r#"{"svalue1": "350", "svalue2": "12500"}"#,
    );
    assert_eq!(power, json!({"kwh": 12.5, "watts": 350}));
}

#[test]
fn test_dimmer_command_template_renders() {
    let docs = generate_with(&GeneratorConfig::default());
    let dimmer = docs
        .list(Artifact::Light)
        .iter()
        .find(|d| d.get_str("name") == Some("Hall Dimmer"))
        .unwrap();
    let on = dimmer.get_str("command_on_template").unwrap();

    let level: serde_json::Value =
        serde_json::from_str(&render_with(on, minijinja::context! { brightness => 255 })).unwrap();
    assert_eq!(
        level,
        json!({"command": "switchlight", "idx": 13, "switchcmd": "Set Level", "level": 100})
    );

    let plain: serde_json::Value =
        serde_json::from_str(&render_with(on, minijinja::context! {})).unwrap();
    assert_eq!(plain, json!({"command": "switchlight", "idx": 13, "switchcmd": "On"}));
}
