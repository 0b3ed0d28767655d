//! Automation rule model
//!
//! This crate provides the typed automation rules the generator emits for
//! the platform's rule engine, plus the builders for their payload templates.
//!
//! # Architecture
//!
//! ```text
//! RULE = TRIGGER → CONDITIONS → PUBLISH ACTIONS
//! ```
//!
//! - **Triggers**: the MQTT topic or lifecycle event the rule listens on
//! - **Conditions**: template predicates scoping a shared topic to one `idx`
//! - **Actions**: `mqtt.publish` calls carrying a destination topic and an
//!   opaque payload template
//!
//! # Key Types
//!
//! - [`AutomationRule`] - Complete rule definition
//! - [`Trigger`] - Event that starts a rule
//! - [`Condition`] - Predicate that must pass
//! - [`Action`] - Publish directive
//! - [`template`] - Payload micro-template grammar

pub mod action;
pub mod condition;
pub mod rule;
pub mod template;
pub mod trigger;

pub use action::{Action, PublishData, MQTT_PUBLISH};
pub use condition::{Condition, TemplateCondition};
pub use rule::AutomationRule;
pub use trigger::{HassEvent, Trigger};
