//! Core types for the driftcheck integrity engine.

use crate::error::SnapshotError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hash: raw 256-bit digest value
pub type Hash = [u8; 32];

/// FileDigest: SHA-256 of a file's content
///
/// The canonical textual form, used both on disk and for display, is 64
/// lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDigest(Hash);

impl FileDigest {
    pub fn from_bytes(bytes: Hash) -> Self {
        FileDigest(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FileDigest {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(SnapshotError::Format(format!(
                "digest must be 64 hex characters, got {} in {:?}",
                s.len(),
                s
            )));
        }
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(SnapshotError::Format(format!(
                "digest must be lowercase hex: {:?}",
                s
            )));
        }

        let mut hash = [0u8; 32];
        hex::decode_to_slice(s, &mut hash)
            .map_err(|e| SnapshotError::Format(format!("invalid hex digest {:?}: {}", s, e)))?;
        Ok(FileDigest(hash))
    }
}

impl Serialize for FileDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FileDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
