// Named-blob artifact store: one JSON file per artifact under a directory.
//
// Writes go through an `ArtifactBatch`: every blob is serialized in memory,
// written to a `.tmp` sibling, and only renamed into place once all of them
// have been written. A failed write removes the temporaries and leaves the
// previous artifacts untouched. Renames run in staging order, so a failed
// rename leaves the blobs before it replaced and the rest at their old
// contents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = "tmp";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact `{name}` not found at {path}")]
    Missing { name: String, path: PathBuf },

    #[error("failed to read artifact `{name}` from {path}: {source}")]
    Read {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode artifact `{name}`: {source}")]
    Decode {
        name: String,
        source: serde_json::Error,
    },

    #[error("failed to encode artifact `{name}`: {source}")]
    Encode {
        name: String,
        source: serde_json::Error,
    },

    #[error("failed to write artifact `{name}` to {path}: {source}")]
    Write {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("artifact `{0}` was added to the batch twice")]
    Duplicate(String),
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A directory of named JSON artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final on-disk path for the artifact `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Load and decode a single artifact.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, ArtifactError> {
        let path = self.path_for(name);
        let raw = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArtifactError::Missing {
                    name: name.to_string(),
                    path: path.clone(),
                }
            } else {
                ArtifactError::Read {
                    name: name.to_string(),
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        let value = serde_json::from_slice(&raw).map_err(|e| ArtifactError::Decode {
            name: name.to_string(),
            source: e,
        })?;
        debug!("loaded artifact {} ({} bytes)", name, raw.len());
        Ok(value)
    }

    /// Start an all-or-nothing write of several artifacts.
    pub fn batch(&self) -> ArtifactBatch<'_> {
        ArtifactBatch {
            store: self,
            pending: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Artifacts staged in memory until `commit`. Dropping an uncommitted batch
/// writes nothing.
#[derive(Debug)]
pub struct ArtifactBatch<'a> {
    store: &'a ArtifactStore,
    pending: Vec<(String, Vec<u8>)>,
}

impl ArtifactBatch<'_> {
    /// Serialize `value` under `name`.
    pub fn put<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), ArtifactError> {
        if self.pending.iter().any(|(n, _)| n == name) {
            return Err(ArtifactError::Duplicate(name.to_string()));
        }
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| ArtifactError::Encode {
            name: name.to_string(),
            source: e,
        })?;
        self.pending.push((name.to_string(), bytes));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Write every staged artifact. Returns the final paths in staging order.
    ///
    /// If a rename fails, artifacts staged before it have already been
    /// replaced; stage the one that marks a complete set last.
    pub fn commit(self) -> Result<Vec<PathBuf>, ArtifactError> {
        let dir = self.store.dir();
        fs::create_dir_all(dir).map_err(|e| ArtifactError::Write {
            name: "<directory>".into(),
            path: dir.to_path_buf(),
            source: e,
        })?;

        // Phase 1: temporaries.
        let mut written: Vec<(String, PathBuf, PathBuf)> = Vec::with_capacity(self.pending.len());
        for (name, bytes) in &self.pending {
            let target = self.store.path_for(name);
            let temp = target.with_extension(format!("{EXTENSION}.{TEMP_SUFFIX}"));
            if let Err(e) = fs::write(&temp, bytes) {
                remove_all(written.iter().map(|(_, t, _)| t.as_path()).chain([temp.as_path()]));
                return Err(ArtifactError::Write {
                    name: name.clone(),
                    path: temp,
                    source: e,
                });
            }
            written.push((name.clone(), temp, target));
        }

        // Phase 2: rename into place.
        let mut paths = Vec::with_capacity(written.len());
        for (i, (name, temp, target)) in written.iter().enumerate() {
            if let Err(e) = fs::rename(temp, target) {
                remove_all(written[i..].iter().map(|(_, t, _)| t.as_path()));
                return Err(ArtifactError::Write {
                    name: name.clone(),
                    path: target.clone(),
                    source: e,
                });
            }
            paths.push(target.clone());
        }

        info!("committed {} artifacts to {}", paths.len(), dir.display());
        Ok(paths)
    }
}

fn remove_all<'p>(paths: impl Iterator<Item = &'p Path>) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
