//! Platform entity ids derived from hub device names

use serde::{Serialize, Serializer};
use std::fmt;

/// Convert a hub device name into the object_id the platform derives from it
///
/// Lower-cases, replaces spaces with underscores and drops apostrophes, so
/// "Kid's Room Lamp" becomes "kids_room_lamp".
pub fn slugify_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace('\'', "")
}

/// A platform entity id such as `sensor.porch_temperature`
///
/// Generated entities are named after hub devices, so the object_id is
/// whatever [`slugify_name`] makes of the device name. Serializes as the
/// dotted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    domain: &'static str,
    object_id: String,
}

impl EntityId {
    /// The entity id the platform assigns to an entity called `name`
    pub fn from_name(domain: &'static str, name: &str) -> Self {
        Self {
            domain,
            object_id: slugify_name(name),
        }
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
