//! Directory traversal
//!
//! Enumerates every regular file reachable from a root directory. Entries are
//! visited in lexical order within each directory so repeated walks of an
//! unchanged tree produce the same sequence.

use crate::error::SnapshotError;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Iterate the regular files under `root`.
///
/// Symbolic links are neither followed nor yielded, and directories, sockets
/// and devices are skipped. Traversal errors are yielded in place; callers
/// decide whether they abort the walk.
pub fn regular_files(root: &Path) -> impl Iterator<Item = Result<PathBuf, SnapshotError>> {
    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    let root = root.to_path_buf();
    walker.into_iter().filter_map(move |entry| match entry {
        Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
        Ok(_) => None,
        Err(err) => {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.clone());
            Some(Err(SnapshotError::Io {
                path,
                source: io::Error::from(err),
            }))
        }
    })
}

/// Fail unless `root` exists and is a directory.
///
/// Without this check walkdir would treat a plain file root as a one-entry
/// tree.
pub(crate) fn ensure_directory(root: &Path) -> Result<(), SnapshotError> {
    let metadata = std::fs::metadata(root).map_err(|e| SnapshotError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(SnapshotError::io(
            root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }
    Ok(())
}

/// Snapshot key for a walked path.
///
/// `.` components are dropped so that walking `.` or `./tree` gives `a.txt` or
/// `tree/a.txt`. Nothing else is normalized: `..` and absolute roots are kept
/// as given.
pub(crate) fn path_key(path: &Path) -> String {
    let key: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if key.as_os_str().is_empty() {
        return ".".to_string();
    }
    key.to_string_lossy().into_owned()
}
