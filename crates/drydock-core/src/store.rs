use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Directory drydock keeps its run state in, under the project root.
pub const STATE_DIR: &str = ".drydock";
const STORE_FILE: &str = "fingerprints.json";

/// In-memory mapping of service directory → last-built fingerprint.
///
/// Persisted as a flat JSON object, string keys and values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprints {
    entries: BTreeMap<String, String>,
}

impl Fingerprints {
    /// An absent entry means the directory has never been built.
    pub fn get(&self, dir: &str) -> Option<&str> {
        self.entries.get(dir).map(String::as_str)
    }

    /// Set exactly one entry; every other entry is left untouched.
    pub fn set(&mut self, dir: &str, digest: &str) {
        self.entries.insert(dir.to_owned(), digest.to_owned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle on the persisted fingerprint document.
pub struct FingerprintStore {
    path: PathBuf,
}

impl FingerprintStore {
    /// Store for a project root: `<root>/.drydock/fingerprints.json`.
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(STATE_DIR).join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted mapping.
    ///
    /// A missing, unreadable, or unparsable document loads as an empty
    /// mapping and never fails the run.
    pub fn load(&self) -> Fingerprints {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Fingerprints::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "fingerprint store unreadable, treating as empty");
                return Fingerprints::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(fingerprints) => fingerprints,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "fingerprint store corrupt, treating as empty");
                Fingerprints::default()
            }
        }
    }

    /// Persist the whole mapping.
    ///
    /// Writes a temp sibling and renames it into place, so an interrupted run
    /// never leaves a half-written document behind.
    pub fn save(&self, fingerprints: &Fingerprints) -> Result<()> {
        let write_err = |e: std::io::Error| Error::StoreWrite {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content =
            serde_json::to_string_pretty(fingerprints).map_err(|e| Error::StoreEncode {
                path: self.path.clone(),
                source: e,
            })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Drop the persisted document. Absence is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::StoreWrite {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
