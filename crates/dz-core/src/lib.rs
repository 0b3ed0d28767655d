//! Core types for the Domoticz to Home Assistant generator
//!
//! This crate provides the fundamental types shared by every stage of a run:
//! the hub's [`DeviceRecord`], slugged [`EntityId`]s, the [`UnitSystem`]
//! preference, and the insertion-ordered [`Document`] handed to the emitter.

mod device;
mod document;
mod entity_id;
mod units;

pub use device::{DeviceFilter, DeviceRecord};
pub use document::{Artifact, Document, DocumentSet};
pub use entity_id::{slugify_name, EntityId};
pub use units::UnitSystem;

/// MQTT topics shared by the hub and the generated rules
pub mod topics {
    /// Topic the hub publishes every device update on
    pub const HUB_OUT: &str = "domoticz/out";

    /// Topic the hub accepts commands on
    pub const HUB_IN: &str = "domoticz/in";

    /// State topic for a light, lock, or sensor entity
    pub fn entity_status(idx: &str, kind: &str) -> String {
        format!("{HUB_OUT}/{idx}/{kind}/status")
    }

    /// Semantic climate state topic (`temp`, `target`, `mode`, `action`)
    pub fn climate_state(idx: &str, slot: &str) -> String {
        format!("{HUB_OUT}/climate/{idx}/{slot}")
    }

    /// Climate command topic (`set`, `mode`)
    pub fn climate_command(idx: &str, slot: &str) -> String {
        format!("{HUB_IN}/climate/{idx}/{slot}")
    }
}

/// Entity domains used by the generated documents
pub mod domains {
    pub const LIGHT: &str = "light";
    pub const SENSOR: &str = "sensor";
    pub const BINARY_SENSOR: &str = "binary_sensor";
    pub const LOCK: &str = "lock";
    pub const GROUP: &str = "group";
}

#[cfg(test)]
mod tests {
    use super::topics;

    #[test]
    fn test_topics() {
        assert_eq!(topics::entity_status("12", "light"), "domoticz/out/12/light/status");
        assert_eq!(topics::climate_state("7", "temp"), "domoticz/out/climate/7/temp");
        assert_eq!(topics::climate_command("7", "set"), "domoticz/in/climate/7/set");
    }
}
