//! Content fingerprints for regular files
//!
//! Files are streamed through SHA-256 in fixed-size chunks so peak memory does
//! not depend on file size. Only content bytes are hashed: the path,
//! timestamps and permissions never contribute to the digest.

use crate::error::SnapshotError;
use crate::types::FileDigest;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read per hasher update
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Compute the FileDigest of the file at `path`
pub fn fingerprint(path: &Path) -> Result<FileDigest, SnapshotError> {
    let file = File::open(path).map_err(|e| SnapshotError::io(path, e))?;
    fingerprint_reader(file).map_err(|e| SnapshotError::io(path, e))
}

/// Fold everything `reader` yields into a FileDigest
pub fn fingerprint_reader<R: Read>(mut reader: R) -> io::Result<FileDigest> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    Ok(FileDigest::from_bytes(hash))
}
