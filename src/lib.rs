//! Driftcheck: File Integrity Snapshots
//!
//! Walks a directory tree, fingerprints every regular file with SHA-256,
//! persists the mapping as a JSON snapshot, and later reports which files are
//! unchanged, modified, or missing relative to it.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod snapshot;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod verify;

pub use error::{ApiError, SnapshotError};
pub use snapshot::{collect, load, persist, Snapshot};
pub use tree::fingerprint;
pub use types::FileDigest;
pub use verify::{find_additions, verify, verify_all, DiffEntry, VerifyReport};
