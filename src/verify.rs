//! Drift detection
//!
//! Compares a previously captured snapshot against the current filesystem.
//! Every path in the snapshot receives exactly one verdict, computed from that
//! path's current state alone. Verification never mutates the snapshot and
//! running it twice over an unchanged tree gives identical results.

use crate::error::SnapshotError;
use crate::snapshot::Snapshot;
use crate::tree::hasher::fingerprint;
use crate::tree::walker::{ensure_directory, path_key, regular_files};
use crate::types::FileDigest;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Verdict for one path recorded in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffEntry {
    Unchanged,
    Modified,
    Missing,
}

impl DiffEntry {
    /// Report label
    pub fn label(&self) -> &'static str {
        match self {
            DiffEntry::Unchanged => "OK",
            DiffEntry::Modified => "MODIFIED",
            DiffEntry::Missing => "MISSING",
        }
    }

    pub fn is_drift(&self) -> bool {
        !matches!(self, DiffEntry::Unchanged)
    }
}

/// Classify every path of `old`, lazily and in stored order.
///
/// A path that cannot be checked (for example, permission denied while
/// reading it) yields an error for that path only; iteration continues with
/// the next entry.
pub fn verify(
    old: &Snapshot,
) -> impl Iterator<Item = (&str, Result<DiffEntry, SnapshotError>)> + '_ {
    old.iter().map(|(path, recorded)| {
        let result = classify(Path::new(path), recorded);
        match &result {
            Ok(entry) => debug!(path, status = entry.label(), "Verified entry"),
            Err(e) => warn!(path, error = %e, "Could not verify entry"),
        }
        (path, result)
    })
}

/// Classify one path against its recorded digest.
///
/// The path counts as present only while it is a regular file: a path that
/// was removed, or replaced by a directory or symlink, is `Missing`.
pub fn classify(path: &Path, recorded: &FileDigest) -> Result<DiffEntry, SnapshotError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if is_absent(&e) => return Ok(DiffEntry::Missing),
        Err(e) => return Err(SnapshotError::io(path, e)),
    };
    if !metadata.file_type().is_file() {
        return Ok(DiffEntry::Missing);
    }

    match current_digest(path)? {
        None => Ok(DiffEntry::Missing),
        Some(current) if current == *recorded => Ok(DiffEntry::Unchanged),
        Some(_) => Ok(DiffEntry::Modified),
    }
}

// The file can disappear between the metadata check and the read.
fn current_digest(path: &Path) -> Result<Option<FileDigest>, SnapshotError> {
    match fingerprint(path) {
        Ok(digest) => Ok(Some(digest)),
        Err(SnapshotError::Io { ref source, .. }) if is_absent(source) => Ok(None),
        Err(e) => Err(e),
    }
}

// A parent directory replaced by a file surfaces as NotADirectory.
fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Paths under `root` that are regular files now but absent from `old`.
///
/// `root` must be spelled the way it was when `old` was collected, since keys
/// are compared verbatim. Paths are returned in walk order.
pub fn find_additions(old: &Snapshot, root: &Path) -> Result<Vec<String>, SnapshotError> {
    ensure_directory(root)?;
    let mut added = Vec::new();
    for path in regular_files(root) {
        let key = path_key(&path?);
        if !old.contains(&key) {
            added.push(key);
        }
    }
    debug!(root = %root.display(), added = added.len(), "Scanned for additions");
    Ok(added)
}

/// One verified path and its outcome
#[derive(Debug)]
pub struct VerifiedEntry {
    pub path: String,
    pub result: Result<DiffEntry, SnapshotError>,
}

/// Counts per verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerifySummary {
    pub unchanged: usize,
    pub modified: usize,
    pub missing: usize,
    pub errors: usize,
    pub added: usize,
}

/// Materialized verification result
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub entries: Vec<VerifiedEntry>,
    pub added: Vec<String>,
}

impl VerifyReport {
    /// Attach the output of [`find_additions`]
    pub fn with_additions(mut self, added: Vec<String>) -> Self {
        self.added = added;
        self
    }

    pub fn summary(&self) -> VerifySummary {
        let mut summary = VerifySummary {
            added: self.added.len(),
            ..VerifySummary::default()
        };
        for entry in &self.entries {
            match entry.result {
                Ok(DiffEntry::Unchanged) => summary.unchanged += 1,
                Ok(DiffEntry::Modified) => summary.modified += 1,
                Ok(DiffEntry::Missing) => summary.missing += 1,
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }

    /// True when anything other than `Unchanged` was observed
    pub fn has_drift(&self) -> bool {
        !self.added.is_empty()
            || self
                .entries
                .iter()
                .any(|e| e.result.as_ref().map_or(true, DiffEntry::is_drift))
    }
}

/// Drain [`verify`] into a report
pub fn verify_all(old: &Snapshot) -> VerifyReport {
    let entries = verify(old)
        .map(|(path, result)| VerifiedEntry {
            path: path.to_string(),
            result,
        })
        .collect();
    VerifyReport {
        entries,
        added: Vec::new(),
    }
}
