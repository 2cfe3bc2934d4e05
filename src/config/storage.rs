//! StorageConfig and default snapshot paths.

use crate::config::xdg;
use crate::error::{ApiError, SnapshotError};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File name prefix for snapshots saved without an explicit destination
pub const SNAPSHOT_PREFIX: &str = "snapshot_";

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for snapshots saved without `--output`.
    /// None means `$XDG_DATA_HOME/driftcheck`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory without touching the filesystem.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ApiError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        xdg::app_data_dir().ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine XDG data home directory (HOME not set)".to_string(),
            )
        })
    }

    /// Default destination for a snapshot of `directory`:
    /// `<data_dir>/snapshot_<basename>.json`. Creates the data directory.
    pub fn default_snapshot_path(&self, directory: &Path) -> Result<PathBuf, ApiError> {
        let data_dir = self.resolve_data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(|e| SnapshotError::io(&data_dir, e))?;
        Ok(data_dir.join(snapshot_file_name(directory)))
    }
}

/// `snapshot_<basename>.json` for `directory`
pub fn snapshot_file_name(directory: &Path) -> String {
    format!("{}{}.json", SNAPSHOT_PREFIX, directory_base_name(directory))
}

/// Last normal component of `directory`. Falls back to the canonical path's
/// name for `.`/`..` spellings, and to `root` when there is none.
fn directory_base_name(directory: &Path) -> String {
    let name = match directory.components().next_back() {
        Some(Component::Normal(name)) => Some(name.to_os_string()),
        _ => dunce::canonicalize(directory)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_os_string())),
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string())
}
