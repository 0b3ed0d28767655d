//! Document generation for the Domoticz to Home Assistant bridge
//!
//! Turns the hub's device listings into the platform's entity configs,
//! automation rules and groups. Nothing here touches the network or the
//! filesystem: input is a [`CatalogSnapshot`], output is a
//! [`GeneratedDocuments`] for the emitter.
//!
//! # Architecture
//!
//! ```text
//! CatalogSnapshot
//!   ├─ lights ──────→ TemplateRuleBuilder + ConfigEntryBuilder ─┐
//!   ├─ temperature ─→ TemplateRuleBuilder + ConfigEntryBuilder ─┤
//!   ├─ utility ─────→ TemplateRuleBuilder + ConfigEntryBuilder ─┼→ GenerationContext → GeneratedDocuments
//!   └─ all ─────────→ ThermostatAssembler (RoleClassifier,      │        (GroupAggregator)
//!                      ModeMap) + startup priming ──────────────┘
//! ```
//!
//! [`CatalogSnapshot`]: dz_catalog::CatalogSnapshot

pub mod context;
pub mod entities;
pub mod error;
pub mod groups;
pub mod kinds;
pub mod mode_map;
pub mod pipeline;
pub mod roles;
pub mod rules;
pub mod startup;
pub mod thermostat;

pub use context::{EntityList, GeneratedDocuments, GenerationContext};
pub use entities::{ConfigEntryBuilder, Entity};
pub use error::{GenerateError, GenerateResult};
pub use groups::{GroupAggregator, GroupDefinition};
pub use mode_map::{ModeMap, ModeVocabulary};
pub use pipeline::generate;
pub use roles::{Role, RoleClassifier, RoleSlots};
pub use rules::TemplateRuleBuilder;
pub use thermostat::{Thermostat, ThermostatAssembler};
