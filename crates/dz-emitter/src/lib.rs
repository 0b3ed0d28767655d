//! Document emitter
//!
//! Serializes generated document sets to YAML, keeping field insertion order
//! and inserting blank lines before each entry's marker key, and writes
//! them to their configured destinations.
//!
//! ```ignore
//! let emitter = DocumentEmitter::new(&root, &config.outputs)?;
//! emitter.preflight().await?;
//! // ... fetch and generate ...
//! emitter.emit_all(documents.iter()).await?;
//! ```

mod error;
mod render;
mod writer;

pub use error::{EmitError, EmitResult};
pub use render::{marker_for, render, space_markers};
pub use writer::DocumentEmitter;
