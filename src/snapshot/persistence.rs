//! Snapshot persistence
//!
//! The on-disk form is a single JSON object mapping path to hex digest,
//! indented with four spaces. There is no version field or envelope.

use super::Snapshot;
use crate::error::SnapshotError;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INDENT: &[u8] = b"    ";

/// Serialize a snapshot to its persisted JSON form (with trailing newline)
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot
        .serialize(&mut serializer)
        .map_err(SnapshotError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Parse a persisted snapshot document
pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    serde_json::from_slice(bytes).map_err(|e| SnapshotError::Format(e.to_string()))
}

/// Write `snapshot` to `destination`, replacing any existing file.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so readers see either the old file or the complete new one. The
/// parent directory must already exist.
pub fn persist(snapshot: &Snapshot, destination: &Path) -> Result<(), SnapshotError> {
    let bytes = encode(snapshot)?;
    let staging = staging_path(destination)?;

    if let Err(e) = write_synced(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(SnapshotError::io(&staging, e));
    }
    if let Err(e) = fs::rename(&staging, destination) {
        let _ = fs::remove_file(&staging);
        return Err(SnapshotError::io(destination, e));
    }

    info!(
        destination = %destination.display(),
        files = snapshot.len(),
        "Snapshot persisted"
    );
    Ok(())
}

/// Read and parse the snapshot stored at `source`
pub fn load(source: &Path) -> Result<Snapshot, SnapshotError> {
    let bytes = fs::read(source).map_err(|e| SnapshotError::io(source, e))?;
    let snapshot = decode(&bytes)?;
    debug!(source = %source.display(), files = snapshot.len(), "Snapshot loaded");
    Ok(snapshot)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `dir/name` -> `dir/.name.tmp`
fn staging_path(destination: &Path) -> Result<PathBuf, SnapshotError> {
    let name = destination.file_name().ok_or_else(|| {
        SnapshotError::io(
            destination,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
        )
    })?;
    let mut staged = OsString::from(".");
    staged.push(name);
    staged.push(".tmp");
    Ok(destination.with_file_name(staged))
}
