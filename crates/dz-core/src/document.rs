//! Insertion-ordered document model
//!
//! Every generated artifact is built as a [`Document`]: an ordered mapping
//! from field name to YAML value. Field order is part of the output contract
//! and is never re-sorted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// An ordered field → value mapping for one generated entity or rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Append a field, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append a field; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a field as a string, if it is one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a document from any serializable struct, keeping field declaration order
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_yaml::Error> {
        match serde_yaml::to_value(value)? {
            Value::Mapping(mapping) => {
                let mut doc = Document::new();
                for (key, value) in mapping {
                    let key = match key {
                        Value::String(s) => s,
                        other => serde_yaml::to_string(&other)?.trim_end().to_string(),
                    };
                    doc.insert(key, value);
                }
                Ok(doc)
            }
            other => Err(<serde_yaml::Error as serde::ser::Error>::custom(format!(
                "expected a mapping, got {other:?}"
            ))),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        let mut mapping = serde_yaml::Mapping::with_capacity(doc.len());
        for (key, value) in doc.0 {
            mapping.insert(Value::String(key), value);
        }
        Value::Mapping(mapping)
    }
}

/// The nine artifacts a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    Automation,
    BinarySensor,
    Climate,
    Group,
    Light,
    Lock,
    Power,
    Sensor,
    UtilityMeter,
}

impl Artifact {
    /// Every artifact, in reporting order
    pub const ALL: [Artifact; 9] = [
        Artifact::Automation,
        Artifact::BinarySensor,
        Artifact::Climate,
        Artifact::Group,
        Artifact::Light,
        Artifact::Lock,
        Artifact::Power,
        Artifact::Sensor,
        Artifact::UtilityMeter,
    ];

    /// Human-readable label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Automation => "automation",
            Artifact::BinarySensor => "binary sensor",
            Artifact::Climate => "climate",
            Artifact::Group => "group",
            Artifact::Light => "light",
            Artifact::Lock => "lock",
            Artifact::Power => "power",
            Artifact::Sensor => "sensor",
            Artifact::UtilityMeter => "utility",
        }
    }
}

/// One output artifact: either a top-level list or a keyed mapping of documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentSet {
    List(Vec<Document>),
    Keyed(IndexMap<String, Document>),
}

impl DocumentSet {
    pub fn len(&self) -> usize {
        match self {
            DocumentSet::List(docs) => docs.len(),
            DocumentSet::Keyed(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        zeta: &'static str,
        alpha: u32,
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let doc = Document::new()
            .with("name", "Porch")
            .with("platform", "mqtt")
            .with("device_class", "opening");

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["name", "platform", "device_class"]);
        assert_eq!(doc.get_str("platform"), Some("mqtt"));
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut doc = Document::new().with("a", "1").with("b", "2");
        doc.insert("a", "3");

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(doc.get_str("a"), Some("3"));
    }

    #[test]
    fn test_from_serialize_keeps_field_order() {
        let doc = Document::from_serialize(&Sample {
            zeta: "z",
            alpha: 1,
        })
        .unwrap();

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        assert!(Document::from_serialize(&"plain").is_err());
    }

    #[test]
    fn test_serializes_in_order() {
        let doc = Document::new().with("name", "Porch").with("alias", "x");
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert_eq!(yaml, "name: Porch\nalias: x\n");
    }
}
