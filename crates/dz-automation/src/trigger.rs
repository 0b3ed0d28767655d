//! Trigger types
//!
//! A trigger names the event source a generated rule listens on.

use serde::{Deserialize, Serialize};

use dz_core::topics;

/// Trigger definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires on every message published to a topic
    Mqtt(MqttTrigger),

    /// Fires on platform start/stop
    Homeassistant(HomeassistantTrigger),
}

impl Trigger {
    /// Listen on an MQTT topic
    pub fn mqtt(topic: impl Into<String>) -> Self {
        Trigger::Mqtt(MqttTrigger {
            topic: topic.into(),
        })
    }

    /// Listen on the hub's shared outbound topic
    pub fn hub_out() -> Self {
        Self::mqtt(topics::HUB_OUT)
    }

    /// Fire once when the platform starts
    pub fn platform_start() -> Self {
        Trigger::Homeassistant(HomeassistantTrigger {
            event: HassEvent::Start,
        })
    }

    /// Get the trigger platform name
    pub fn platform(&self) -> &'static str {
        match self {
            Trigger::Mqtt(_) => "mqtt",
            Trigger::Homeassistant(_) => "homeassistant",
        }
    }

    /// The MQTT topic, for MQTT triggers
    pub fn topic(&self) -> Option<&str> {
        match self {
            Trigger::Mqtt(t) => Some(&t.topic),
            Trigger::Homeassistant(_) => None,
        }
    }
}

/// MQTT message trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttTrigger {
    pub topic: String,
}

/// Platform lifecycle trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeassistantTrigger {
    /// Event: start or shutdown
    pub event: HassEvent,
}

/// Platform lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HassEvent {
    Start,
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mqtt_trigger_serialize() {
        let yaml = serde_yaml::to_string(&Trigger::hub_out()).unwrap();
        assert_eq!(yaml, "platform: mqtt\ntopic: domoticz/out\n");
    }

    #[test]
    fn test_start_trigger_serialize() {
        let yaml = serde_yaml::to_string(&Trigger::platform_start()).unwrap();
        assert_eq!(yaml, "platform: homeassistant\nevent: start\n");
    }

    #[test]
    fn test_trigger_deserialize() {
        let json = r#"{"platform": "mqtt", "topic": "domoticz/in/climate/5/set"}"#;
        let trigger: Trigger = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.platform(), "mqtt");
        assert_eq!(trigger.topic(), Some("domoticz/in/climate/5/set"));
    }
}
