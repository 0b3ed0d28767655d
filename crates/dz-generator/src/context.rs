//! Per-run accumulator
//!
//! Generators push into one [`GenerationContext`] for the whole pass; it is
//! consumed once at the end to aggregate groups and produce the output sets.

use indexmap::IndexMap;
use tracing::{debug, info};

use dz_automation::AutomationRule;
use dz_config::GeneratorConfig;
use dz_core::{Artifact, DeviceRecord, Document, DocumentSet};

use crate::error::{GenerateError, GenerateResult};
use crate::groups::GroupAggregator;

/// Artifacts that are plain lists of entity documents
///
/// Groups and utility meters are keyed and have their own entry points;
/// automation rules go through [`GenerationContext::add_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityList {
    BinarySensor,
    Climate,
    Light,
    Lock,
    Power,
    Sensor,
}

impl EntityList {
    pub fn artifact(self) -> Artifact {
        match self {
            EntityList::BinarySensor => Artifact::BinarySensor,
            EntityList::Climate => Artifact::Climate,
            EntityList::Light => Artifact::Light,
            EntityList::Lock => Artifact::Lock,
            EntityList::Power => Artifact::Power,
            EntityList::Sensor => Artifact::Sensor,
        }
    }
}

/// Mutable state of one generation pass
#[derive(Debug)]
pub struct GenerationContext<'c> {
    config: &'c GeneratorConfig,
    rules: Vec<AutomationRule>,
    binary_sensors: Vec<Document>,
    climate: Vec<Document>,
    lights: Vec<Document>,
    locks: Vec<Document>,
    power: Vec<Document>,
    sensors: Vec<Document>,
    utility_meters: IndexMap<String, Document>,
    groups: GroupAggregator,
}

impl<'c> GenerationContext<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
            binary_sensors: Vec::new(),
            climate: Vec::new(),
            lights: Vec::new(),
            locks: Vec::new(),
            power: Vec::new(),
            sensors: Vec::new(),
            utility_meters: IndexMap::new(),
            groups: GroupAggregator::new(),
        }
    }

    pub fn config(&self) -> &'c GeneratorConfig {
        self.config
    }

    /// Whether a device must be skipped because of its hardware; logs the skip
    pub fn is_ignored(&self, device: &DeviceRecord) -> bool {
        let ignored = self.config.is_hardware_ignored(&device.hardware_name);
        if ignored {
            info!(
                "Skipping '{}' ({}) due to hardware '{}'",
                device.name, device.idx, device.hardware_name
            );
        }
        ignored
    }

    pub fn add_rule(&mut self, rule: AutomationRule) {
        debug!("Rule {}", rule.alias);
        self.rules.push(rule);
    }

    /// Append an entity document to its list
    pub fn add_entity(&mut self, list: EntityList, config: Document) {
        debug!(
            "{} entity {}",
            list.artifact().label(),
            config.get_str("name").unwrap_or("<unnamed>")
        );
        let documents = match list {
            EntityList::BinarySensor => &mut self.binary_sensors,
            EntityList::Climate => &mut self.climate,
            EntityList::Light => &mut self.lights,
            EntityList::Lock => &mut self.locks,
            EntityList::Power => &mut self.power,
            EntityList::Sensor => &mut self.sensors,
        };
        documents.push(config);
    }

    pub fn add_utility_meter(&mut self, key: impl Into<String>, config: Document) {
        let key = key.into();
        debug!("utility meter {}", key);
        self.utility_meters.insert(key, config);
    }

    pub fn groups_mut(&mut self) -> &mut GroupAggregator {
        &mut self.groups
    }

    /// Aggregate groups and assemble every output set
    pub fn finish(self) -> GenerateResult<GeneratedDocuments> {
        let automation = self
            .rules
            .iter()
            .map(|rule| {
                rule.to_document().map_err(|source| GenerateError::RuleDocument {
                    alias: rule.alias.clone(),
                    source,
                })
            })
            .collect::<GenerateResult<Vec<_>>>()?;

        let groups = self
            .groups
            .finish()
            .into_iter()
            .map(|(key, group)| (key, group.to_document()))
            .collect();

        let mut sets = IndexMap::new();
        sets.insert(Artifact::Automation, DocumentSet::List(automation));
        sets.insert(Artifact::BinarySensor, DocumentSet::List(self.binary_sensors));
        sets.insert(Artifact::Climate, DocumentSet::List(self.climate));
        sets.insert(Artifact::Group, DocumentSet::Keyed(groups));
        sets.insert(Artifact::Light, DocumentSet::List(self.lights));
        sets.insert(Artifact::Lock, DocumentSet::List(self.locks));
        sets.insert(Artifact::Power, DocumentSet::List(self.power));
        sets.insert(Artifact::Sensor, DocumentSet::List(self.sensors));
        sets.insert(Artifact::UtilityMeter, DocumentSet::Keyed(self.utility_meters));

        Ok(GeneratedDocuments {
            rules: self.rules,
            sets,
        })
    }
}

/// Every output set of a run, plus the typed rules behind the automation set
#[derive(Debug, Clone)]
pub struct GeneratedDocuments {
    rules: Vec<AutomationRule>,
    sets: IndexMap<Artifact, DocumentSet>,
}

impl GeneratedDocuments {
    pub fn rules(&self) -> &[AutomationRule] {
        &self.rules
    }

    pub fn get(&self, artifact: Artifact) -> Option<&DocumentSet> {
        self.sets.get(&artifact)
    }

    /// Sets in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Artifact, &DocumentSet)> {
        self.sets.iter().map(|(artifact, set)| (*artifact, set))
    }

    /// List documents of an artifact; empty for keyed or missing sets
    pub fn list(&self, artifact: Artifact) -> &[Document] {
        match self.sets.get(&artifact) {
            Some(DocumentSet::List(docs)) => docs,
            _ => &[],
        }
    }

    /// Keyed documents of an artifact, if it is a keyed set
    pub fn keyed(&self, artifact: Artifact) -> Option<&IndexMap<String, Document>> {
        match self.sets.get(&artifact) {
            Some(DocumentSet::Keyed(docs)) => Some(docs),
            _ => None,
        }
    }

    /// Total number of documents across all sets
    pub fn document_count(&self) -> usize {
        self.sets.values().map(DocumentSet::len).sum()
    }
}
