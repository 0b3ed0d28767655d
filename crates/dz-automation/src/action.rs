//! Action types
//!
//! Every generated rule acts by publishing a templated payload to a topic.

use serde::{Deserialize, Serialize};

/// Service that publishes an MQTT message
pub const MQTT_PUBLISH: &str = "mqtt.publish";

/// A service call with templated data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub service: String,
    pub data_template: PublishData,
}

impl Action {
    /// Publish `payload_template` to `topic`
    pub fn publish(topic: impl Into<String>, payload_template: impl Into<String>) -> Self {
        Self {
            service: MQTT_PUBLISH.to_string(),
            data_template: PublishData {
                topic: topic.into(),
                payload_template: payload_template.into(),
            },
        }
    }

    pub fn topic(&self) -> &str {
        &self.data_template.topic
    }

    pub fn payload_template(&self) -> &str {
        &self.data_template.payload_template
    }
}

/// Destination topic plus the opaque payload template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishData {
    pub topic: String,
    pub payload_template: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_action_serialize() {
        let action = Action::publish("domoticz/in", "ON");
        let yaml = serde_yaml::to_string(&action).unwrap();
        assert!(yaml.starts_with("service: mqtt.publish\ndata_template:\n  topic: domoticz/in\n"));

        let parsed: Action = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.payload_template(), "ON");
    }
}
