//! Snapshots
//!
//! A snapshot maps each regular file found under a root directory to its
//! content digest. Keys are paths exactly as the walk produced them, so a
//! snapshot taken from a relative root has relative keys. Entry order follows
//! the walk and survives persistence, but comparisons are always by key.

pub mod persistence;

pub use persistence::{decode, encode, load, persist};

use crate::error::SnapshotError;
use crate::tree::hasher::fingerprint;
use crate::tree::walker::{ensure_directory, path_key, regular_files};
use crate::types::FileDigest;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Snapshot: path -> FileDigest for every regular file of one walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: IndexMap<String, FileDigest>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `digest` for `path`, replacing any previous digest
    pub fn insert(&mut self, path: impl Into<String>, digest: FileDigest) -> Option<FileDigest> {
        self.entries.insert(path.into(), digest)
    }

    pub fn get(&self, path: &str) -> Option<&FileDigest> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileDigest)> {
        self.entries.iter().map(|(path, digest)| (path.as_str(), digest))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, FileDigest)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, FileDigest)>>(iter: I) -> Self {
        Snapshot {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Walk `root` and fingerprint every regular file beneath it.
///
/// `root` must be an existing directory. The first traversal or read failure
/// aborts the collection; no partial snapshot is returned.
pub fn collect(root: &Path) -> Result<Snapshot, SnapshotError> {
    ensure_directory(root)?;
    debug!(root = %root.display(), "Collecting snapshot");

    let mut snapshot = Snapshot::new();
    for path in regular_files(root) {
        let path = path?;
        let digest = fingerprint(&path)?;
        debug!(path = %path.display(), digest = %digest, "Fingerprinted file");
        snapshot.insert(path_key(&path), digest);
    }

    info!(root = %root.display(), files = snapshot.len(), "Snapshot collected");
    Ok(snapshot)
}
