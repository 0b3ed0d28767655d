//! Output files

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tokio::fs;
use tracing::{debug, info};

use dz_config::OutputLayout;
use dz_core::{Artifact, DocumentSet};

use crate::error::{EmitError, EmitResult};
use crate::render::{marker_for, render};

/// Writes each artifact to its configured file
#[derive(Debug, Clone)]
pub struct DocumentEmitter {
    targets: IndexMap<Artifact, PathBuf>,
}

impl DocumentEmitter {
    /// Resolve every artifact's destination under `root`
    ///
    /// Two artifacts resolving to the same file is an error: the second would
    /// silently overwrite the first.
    pub fn new(root: &Path, layout: &OutputLayout) -> EmitResult<Self> {
        let mut targets: IndexMap<Artifact, PathBuf> = IndexMap::new();
        for (artifact, path) in layout.resolve(root) {
            if let Some((other, _)) = targets.iter().find(|(_, p)| **p == path) {
                return Err(EmitError::DuplicateTarget {
                    path,
                    first: other.label(),
                    second: artifact.label(),
                });
            }
            targets.insert(artifact, path);
        }
        Ok(Self { targets })
    }

    /// Destinations in reporting order
    pub fn targets(&self) -> impl Iterator<Item = (Artifact, &Path)> {
        self.targets.iter().map(|(a, p)| (*a, p.as_path()))
    }

    pub fn target(&self, artifact: Artifact) -> Option<&Path> {
        self.targets.get(&artifact).map(PathBuf::as_path)
    }

    /// Create every destination directory before any work is done
    pub async fn preflight(&self) -> EmitResult<()> {
        for path in self.targets.values() {
            let Some(dir) = path.parent() else {
                continue;
            };
            fs::create_dir_all(dir)
                .await
                .map_err(|source| EmitError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            debug!("Output directory ready: {:?}", dir);
        }
        Ok(())
    }

    /// Render and write one artifact, replacing any previous file
    pub async fn emit(&self, artifact: Artifact, set: &DocumentSet) -> EmitResult<&Path> {
        let path = self
            .target(artifact)
            .ok_or(EmitError::UnknownTarget(artifact))?;
        let content = render(set, marker_for(artifact))?;

        // Write next to the target, then rename over it
        let mut temp_path = path.as_os_str().to_owned();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        let write_err = |source: std::io::Error| EmitError::Write {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&temp_path, content.as_bytes())
            .await
            .map_err(write_err)?;
        fs::rename(&temp_path, path).await.map_err(write_err)?;

        info!("Wrote {} {} entries to {:?}", set.len(), artifact.label(), path);
        Ok(path)
    }

    /// Write every set, in the order given
    pub async fn emit_all<'a, I>(&self, sets: I) -> EmitResult<usize>
    where
        I: IntoIterator<Item = (Artifact, &'a DocumentSet)>,
    {
        let mut written = 0;
        for (artifact, set) in sets {
            self.emit(artifact, set).await?;
            written += 1;
        }
        Ok(written)
    }
}
