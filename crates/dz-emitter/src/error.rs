//! Error types for document emission

use std::path::PathBuf;

use thiserror::Error;

use dz_core::Artifact;

/// Result type for emitter operations
pub type EmitResult<T> = Result<T, EmitError>;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot prepare output directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is the destination of both the {first} and {second} output")]
    DuplicateTarget {
        path: PathBuf,
        first: &'static str,
        second: &'static str,
    },

    #[error("no destination configured for the {} output", .0.label())]
    UnknownTarget(Artifact),
}
