//! Automation rules for everything that is not a thermostat
//!
//! Each rule listens on the hub's shared outbound topic, is scoped to one
//! device's `idx`, and republishes a reshaped payload on that device's
//! own status topic.

use dz_automation::template::{self, JsonPayload};
use dz_automation::{AutomationRule, Condition};
use dz_core::{topics, DeviceRecord, UnitSystem};

use crate::kinds::SensorKind;

/// Scale factor between the hub's 0-100 level and the platform's 0-255 brightness
pub const BRIGHTNESS_SCALE: &str = "2.55";

fn nvalue_is(value: u8) -> String {
    format!("{} == {value}", template::field("nvalue"))
}

/// Builds per-device rules from fixed source → payload field schemas
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRuleBuilder {
    unit: UnitSystem,
}

impl TemplateRuleBuilder {
    pub fn new(unit: UnitSystem) -> Self {
        Self { unit }
    }

    /// `svalueN` as a float, converted to the display unit
    fn temperature(&self, field: &str) -> String {
        template::float_field(field, self.unit.conversion_suffix())
    }

    /// On/off state of a light or dimmer
    pub fn light(&self, device: &DeviceRecord) -> AutomationRule {
        let payload = JsonPayload::new()
            .raw(
                "state",
                template::if_else(&nvalue_is(0), "\"off\"", "\"on\""),
            )
            .build();

        AutomationRule::on_hub_update(format!("{}_light", device.idx), &device.idx)
            .with_condition(Condition::template(template::interpolate(&format!(
                "{} in [0, 1]",
                template::field("nvalue")
            ))))
            .publish(topics::entity_status(&device.idx, "light"), payload)
    }

    /// Brightness of a dimmer set to a level
    pub fn dimmer(&self, device: &DeviceRecord) -> AutomationRule {
        let payload = JsonPayload::new()
            .string("state", "on")
            .expr(
                "brightness",
                &format!(
                    "({}|float * {BRIGHTNESS_SCALE})|round|int",
                    template::field("svalue1")
                ),
            )
            .build();

        AutomationRule::on_hub_update(format!("{}_dimmer", device.idx), &device.idx)
            .with_condition(Condition::template(template::interpolate(&nvalue_is(2))))
            .publish(topics::entity_status(&device.idx, "light"), payload)
    }

    pub fn lock(&self, device: &DeviceRecord) -> AutomationRule {
        let payload = JsonPayload::new()
            .raw(
                "state",
                template::if_else(&nvalue_is(1), "\"LOCK\"", "\"UNLOCK\""),
            )
            .build();

        AutomationRule::on_hub_update(format!("{}_lock", device.idx), &device.idx)
            .publish(topics::entity_status(&device.idx, "lock"), payload)
    }

    /// Bare ON/OFF literal, not JSON
    pub fn binary_sensor(&self, device: &DeviceRecord) -> AutomationRule {
        AutomationRule::on_hub_update(format!("{}_sensor", device.idx), &device.idx).publish(
            topics::entity_status(&device.idx, "sensor"),
            template::if_else(&nvalue_is(1), "ON", "OFF"),
        )
    }

    /// Temperature, humidity, barometer or wind readings
    pub fn sensor(&self, device: &DeviceRecord, kind: SensorKind) -> AutomationRule {
        let mut payload = JsonPayload::new();
        match kind {
            SensorKind::Wind => {
                payload = payload
                    .expr("windspeed", &template::field("svalue3"))
                    .expr("windgust", &template::field("svalue4"))
                    .expr("windchill", &self.temperature("svalue6"))
                    .quoted_expr("direction", &template::field("svalue2"));
            }
            _ => {
                payload = payload.expr("temperature", &self.temperature("svalue1"));
                if kind.has_humidity() {
                    payload = payload.expr("humidity", &template::field("svalue2"));
                }
                if kind.has_barometer() {
                    payload = payload.expr("barometer", &template::field("svalue4"));
                }
            }
        }

        AutomationRule::on_hub_update(format!("{}_sensor", device.idx), &device.idx)
            .publish(topics::entity_status(&device.idx, "sensor"), payload.build())
    }

    /// Energy meter: counter in Wh becomes kWh, instantaneous power passes through
    pub fn power(&self, device: &DeviceRecord) -> AutomationRule {
        let payload = JsonPayload::new()
            .expr("kwh", &format!("{}|float / 1000", template::field("svalue2")))
            .expr("watts", &template::field("svalue1"))
            .build();

        AutomationRule::on_hub_update(format!("{}_kwh_sensor", device.idx), &device.idx)
            .publish(topics::entity_status(&device.idx, "sensor"), payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_rule_shape() {
        let device = DeviceRecord::new("12", "Porch").with_switch_type("On/Off");
        let rule = TemplateRuleBuilder::default().light(&device);

        assert_eq!(rule.alias, "12_light");
        assert!(rule.is_scoped_to("12"));
        assert_eq!(rule.condition.len(), 2);
        assert_eq!(
            rule.condition[1].value_template(),
            "{{ trigger.payload_json.nvalue in [0, 1] }}"
        );
        assert_eq!(rule.action[0].topic(), "domoticz/out/12/light/status");
        assert_eq!(
            rule.action[0].payload_template(),
            "{\"state\": {% if trigger.payload_json.nvalue == 0 %}\"off\"{% else %}\"on\"{% endif %} }"
        );
    }

    #[test]
    fn test_lock_payload() {
        let rule = TemplateRuleBuilder::default().lock(&DeviceRecord::new("3", "Front Door"));
        assert_eq!(rule.alias, "3_lock");
        assert!(rule.is_scoped_to("3"));
        assert_eq!(
            rule.action[0].payload_template(),
            "{\"state\": {% if trigger.payload_json.nvalue == 1 %}\"LOCK\"{% else %}\"UNLOCK\"{% endif %} }"
        );
    }

    #[test]
    fn test_temperature_conversion_by_unit() {
        let device = DeviceRecord::new("8", "Attic").with_type("Temp");

        let imperial = TemplateRuleBuilder::new(UnitSystem::Imperial).sensor(&device, SensorKind::Temp);
        assert_eq!(
            imperial.action[0].payload_template(),
            "{\"temperature\": {{ trigger.payload_json.svalue1|float * 1.8 + 32 }} }"
        );

        let metric = TemplateRuleBuilder::new(UnitSystem::Metric).sensor(&device, SensorKind::Temp);
        assert_eq!(
            metric.action[0].payload_template(),
            "{\"temperature\": {{ trigger.payload_json.svalue1|float }} }"
        );
    }

    #[test]
    fn test_wind_payload_fields() {
        let device = DeviceRecord::new("9", "Roof").with_type("Wind");
        let rule = TemplateRuleBuilder::new(UnitSystem::Metric).sensor(&device, SensorKind::Wind);
        let payload = rule.action[0].payload_template();

        assert!(payload.starts_with("{\"windspeed\": {{ trigger.payload_json.svalue3 }}"));
        assert!(payload.contains("\"windchill\": {{ trigger.payload_json.svalue6|float }}"));
        assert!(payload.ends_with("\"direction\": \"{{ trigger.payload_json.svalue2 }}\" }"));
    }

    #[test]
    fn test_power_rule() {
        let rule = TemplateRuleBuilder::default().power(&DeviceRecord::new("20", "Dryer"));
        assert_eq!(rule.alias, "20_kwh_sensor");
        assert_eq!(
            rule.action[0].payload_template(),
            "{\"kwh\": {{ trigger.payload_json.svalue2|float / 1000 }}, \"watts\": {{ trigger.payload_json.svalue1 }} }"
        );
    }
}
