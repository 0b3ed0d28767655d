//! Entity grouping
//!
//! Explicit groups are claimed while entities are generated (a sensor's
//! temperature and humidity readings, a meter's consumption cycles, ...).
//! Once every device has been seen, two catch-all groups collect whatever
//! no explicit group claimed.

use indexmap::IndexMap;
use serde_yaml::Value;
use tracing::{debug, warn};

use dz_core::{domains, Document, EntityId};

/// Key of the catch-all group for sensors
pub const SENSORS_GROUP: &str = "sensors";

/// Key of the catch-all group for lights
pub const LIGHTS_GROUP: &str = "lights";

/// Keys explicit groups can never take
const RESERVED_KEYS: [&str; 2] = [SENSORS_GROUP, LIGHTS_GROUP];

/// A named entity collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefinition {
    pub name: String,
    pub entities: Vec<EntityId>,
}

impl GroupDefinition {
    pub fn new(name: impl Into<String>, entities: Vec<EntityId>) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entities.contains(entity)
    }

    pub fn to_document(&self) -> Document {
        let entities: Vec<Value> = self
            .entities
            .iter()
            .map(|e| Value::String(e.to_string()))
            .collect();
        Document::new()
            .with("name", self.name.as_str())
            .with("entities", entities)
    }
}

/// Accumulates group membership over one generation pass
#[derive(Debug, Clone, Default)]
pub struct GroupAggregator {
    explicit: IndexMap<String, GroupDefinition>,
    sensor_candidates: Vec<EntityId>,
    lights: Vec<EntityId>,
}

impl GroupAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explicit group and return the key it was stored under
    ///
    /// Keys are slugged device names, so they can collide with a catch-all
    /// or with an earlier group. A colliding key gets the first free `_<n>`
    /// suffix, starting at 2.
    pub fn claim(&mut self, key: impl Into<String>, group: GroupDefinition) -> String {
        let wanted = key.into();
        let mut key = wanted.clone();
        let mut n = 2;
        while self.is_taken(&key) {
            key = format!("{wanted}_{n}");
            n += 1;
        }
        if key != wanted {
            warn!("Group key '{}' is already taken; using '{}'", wanted, key);
        }
        debug!("Group '{}' claims {} entities", key, group.entities.len());
        self.explicit.insert(key.clone(), group);
        key
    }

    fn is_taken(&self, key: &str) -> bool {
        RESERVED_KEYS.contains(&key) || self.explicit.contains_key(key)
    }

    /// Offer an entity to the sensors catch-all
    pub fn offer_sensor(&mut self, entity: EntityId) {
        if !self.sensor_candidates.contains(&entity) {
            self.sensor_candidates.push(entity);
        }
    }

    /// Offer an entity to the lights catch-all
    pub fn offer_light(&mut self, entity: EntityId) {
        if !self.lights.contains(&entity) {
            self.lights.push(entity);
        }
    }

    fn is_claimed(&self, entity: &EntityId) -> bool {
        self.explicit.values().any(|g| g.contains(entity))
    }

    /// Every group: explicit ones first, then `sensors`, then `lights`
    ///
    /// The sensors catch-all holds the offered sensors no explicit group
    /// claimed, followed by a `group.<key>` reference to each explicit group.
    /// Lights are never claimed by explicit groups.
    pub fn finish(self) -> IndexMap<String, GroupDefinition> {
        let mut sensors: Vec<EntityId> = self
            .sensor_candidates
            .iter()
            .filter(|e| !self.is_claimed(e))
            .cloned()
            .collect();
        sensors.extend(
            self.explicit
                .keys()
                .map(|key| EntityId::from_name(domains::GROUP, key)),
        );

        let lights: Vec<EntityId> = self
            .lights
            .iter()
            .filter(|e| !self.is_claimed(e))
            .cloned()
            .collect();

        let mut groups = self.explicit;
        groups.insert(
            SENSORS_GROUP.to_string(),
            GroupDefinition::new("Sensors", sensors),
        );
        groups.insert(LIGHTS_GROUP.to_string(), GroupDefinition::new("Lights", lights));
        groups
    }
}
