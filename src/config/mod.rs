//! Configuration
//!
//! Layered loading through the `config` crate: built-in defaults, then the
//! global file, then the workspace file, then `FILEHUNT__*` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::{StorageBackend, StorageConfig};

use crate::logging::LoggingConfig;
use crate::scoring::ScenarioConstants;
use crate::tree::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilehuntConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/// Where finalized evaluations are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSink {
    #[default]
    Stdout,
    File,
}

fn default_target_origin() -> String {
    "*".to_string()
}

/// Result channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub sink: ReportSink,

    /// JSON-lines file, required when `sink = "file"`
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Receiving origin the host message is addressed to. `"*"` means any
    /// origin; it is recorded, not enforced. Replace with an allow-list
    /// before any production deployment.
    #[serde(default = "default_target_origin")]
    pub target_origin: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sink: ReportSink::default(),
            file: None,
            target_origin: default_target_origin(),
        }
    }
}

fn default_rng_seed() -> u64 {
    DEFAULT_SEED
}

/// Exercise definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Seed for the generated filler files
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,

    #[serde(default)]
    pub constants: ScenarioConstants,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            rng_seed: default_rng_seed(),
            constants: ScenarioConstants::default(),
        }
    }
}
