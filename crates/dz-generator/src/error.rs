//! Error types for document generation

use thiserror::Error;

/// Result type for generation
pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A typed rule could not be turned into an ordered document
    #[error("failed to build document for rule '{alias}': {source}")]
    RuleDocument {
        alias: String,
        #[source]
        source: serde_yaml::Error,
    },
}
