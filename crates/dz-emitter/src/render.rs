//! YAML rendering with presentation spacing
//!
//! Documents serialize in field insertion order. A blank line is inserted
//! before every line that opens a new top-level entry, identified by the
//! artifact's marker key, so long files stay scannable by eye.

use dz_core::{Artifact, DocumentSet};

use crate::error::EmitResult;

/// Key whose lines get a blank line in front of them, per artifact
pub fn marker_for(artifact: Artifact) -> Option<&'static str> {
    match artifact {
        Artifact::Automation => Some("alias"),
        Artifact::Climate => Some("platform"),
        Artifact::BinarySensor
        | Artifact::Light
        | Artifact::Lock
        | Artifact::Power
        | Artifact::Sensor => Some("name"),
        Artifact::Group | Artifact::UtilityMeter => None,
    }
}

/// Serialize a document set and space it around `marker` lines
pub fn render(set: &DocumentSet, marker: Option<&str>) -> EmitResult<String> {
    let yaml = serde_yaml::to_string(set)?;
    Ok(match marker {
        Some(marker) => space_markers(&yaml, marker),
        None => yaml,
    })
}

/// Insert a blank line before each `marker:` or `- marker:` line
///
/// Nothing is inserted before the first line.
pub fn space_markers(yaml: &str, marker: &str) -> String {
    let key = format!("{marker}:");
    let item = format!("- {marker}:");
    let mut out = String::with_capacity(yaml.len() + yaml.len() / 8);

    for (i, line) in yaml.lines().enumerate() {
        let trimmed = line.trim_start();
        if i > 0 && (trimmed.starts_with(&key) || trimmed.starts_with(&item)) {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
