//! Automation rules
//!
//! A rule ties together one trigger, optional conditions, and one or more
//! publish actions. Rules are built once and never mutated after the
//! generator that made them returns.

use serde::{Deserialize, Serialize};

use dz_core::Document;

use crate::action::Action;
use crate::condition::Condition;
use crate::template;
use crate::trigger::Trigger;

/// A generated automation rule
///
/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    /// Unique human-readable name, e.g. "42_light"
    pub alias: String,

    pub trigger: Trigger,

    /// Predicates that must all hold; empty when the trigger is already device specific
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub condition: Vec<Condition>,

    pub action: Vec<Action>,
}

impl AutomationRule {
    pub fn new(alias: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            alias: alias.into(),
            trigger,
            condition: Vec::new(),
            action: Vec::new(),
        }
    }

    /// Rule listening on the hub's shared outbound topic, scoped to one device
    pub fn on_hub_update(alias: impl Into<String>, idx: &str) -> Self {
        Self::new(alias, Trigger::hub_out()).with_condition(Condition::idx_equals(idx))
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition.push(condition);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action.push(action);
        self
    }

    /// Convenience for the common single publish action
    pub fn publish(self, topic: impl Into<String>, payload_template: impl Into<String>) -> Self {
        self.with_action(Action::publish(topic, payload_template))
    }

    /// Whether a condition restricts this rule to messages from `idx`
    pub fn is_scoped_to(&self, idx: &str) -> bool {
        let expected = template::idx_equals(idx);
        self.condition
            .iter()
            .any(|c| c.value_template() == expected)
    }

    /// Ordered document for the emitter
    pub fn to_document(&self) -> Result<Document, serde_yaml::Error> {
        Document::from_serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> AutomationRule {
        AutomationRule::on_hub_update("12_sensor", "12")
            .publish("domoticz/out/12/sensor/status", "{{ trigger.payload_json.svalue1 }}")
    }

    #[test]
    fn test_rule_is_scoped() {
        let rule = sample_rule();
        assert!(rule.is_scoped_to("12"));
        assert!(!rule.is_scoped_to("1"));
        assert_eq!(rule.trigger.topic(), Some("domoticz/out"));
    }

    #[test]
    fn test_rule_document_field_order() {
        let doc = sample_rule().to_document().unwrap();
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["alias", "trigger", "condition", "action"]);
    }

    #[test]
    fn test_unconditioned_rule_omits_condition() {
        let rule = AutomationRule::new("5_target_temp_set", Trigger::mqtt("domoticz/in/climate/5/set"))
            .publish("domoticz/in", "x");
        let doc = rule.to_document().unwrap();
        assert!(!doc.contains_key("condition"));
    }

    #[test]
    fn test_rule_deserialize() {
        let yaml = r#"
alias: 3_lock
trigger:
  platform: mqtt
  topic: domoticz/out
condition:
  - condition: template
    value_template: "{{ trigger.payload_json.idx == 3 }}"
action:
  - service: mqtt.publish
    data_template:
      topic: domoticz/out/3/lock/status
      payload_template: "LOCK"
"#;
        let rule: AutomationRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.alias, "3_lock");
        assert!(rule.is_scoped_to("3"));
        assert_eq!(rule.action.len(), 1);
    }
}
