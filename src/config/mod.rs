//! Configuration
//!
//! Layered configuration built with the `config` crate. Sources, lowest to
//! highest precedence: built-in defaults, the global config file (or an
//! explicit `--config` file in its place), then `DRIFTCHECK__*` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
