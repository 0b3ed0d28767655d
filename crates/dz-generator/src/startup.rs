//! Startup priming
//!
//! The hub only publishes on change, so right after the platform starts its
//! bridged entities have no state. This rule asks the hub to report every
//! device once.

use dz_automation::template::JsonPayload;
use dz_automation::{AutomationRule, Trigger};
use dz_core::{topics, DeviceRecord};

pub const PRIME_ALIAS: &str = "prime_domoticz_devices";

/// One `getdeviceinfo` request per device, fired on platform start
pub fn priming_rule<'a>(devices: impl IntoIterator<Item = &'a DeviceRecord>) -> AutomationRule {
    devices
        .into_iter()
        .fold(AutomationRule::new(PRIME_ALIAS, Trigger::platform_start()), |rule, device| {
            let payload = JsonPayload::new()
                .string("command", "getdeviceinfo")
                .raw("idx", device.idx.as_str())
                .build();
            rule.publish(topics::HUB_IN, payload)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priming_rule() {
        let devices = [DeviceRecord::new("1", "Porch"), DeviceRecord::new("7", "Hall")];
        let rule = priming_rule(&devices);

        assert_eq!(rule.alias, PRIME_ALIAS);
        assert_eq!(rule.trigger, Trigger::platform_start());
        assert!(rule.condition.is_empty());
        assert_eq!(rule.action.len(), 2);
        assert_eq!(rule.action[1].topic(), "domoticz/in");
        assert_eq!(
            rule.action[1].payload_template(),
            "{\"command\": \"getdeviceinfo\", \"idx\": 7 }"
        );
    }
}
