//! Condition types
//!
//! Conditions narrow a rule that listens on a shared topic down to the
//! messages of one device.

use serde::{Deserialize, Serialize};

use crate::template;

/// Condition definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    /// Evaluate a template to true/false
    Template(TemplateCondition),
}

impl Condition {
    /// Create a template condition
    pub fn template(value_template: impl Into<String>) -> Self {
        Condition::Template(TemplateCondition {
            value_template: value_template.into(),
        })
    }

    /// Only pass messages whose `idx` equals the given device reference
    pub fn idx_equals(idx: &str) -> Self {
        Self::template(template::idx_equals(idx))
    }

    pub fn value_template(&self) -> &str {
        match self {
            Condition::Template(c) => &c.value_template,
        }
    }
}

/// Template condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCondition {
    pub value_template: String,
}
