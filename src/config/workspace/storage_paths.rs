//! StorageConfig and resolve_path for the session snapshot store.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_STORE_PATH: &str = ".filehunt/session";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Snapshot store implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// sled database on disk; the session survives between invocations
    #[default]
    Sled,
    /// In-process only; every invocation starts from the seed
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the snapshot database (relative to workspace root)
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl StorageConfig {
    /// Resolve the store path to an actual filesystem location.
    ///
    /// The default path lives in the XDG data directory for the workspace;
    /// an explicit path is taken relative to the workspace root.
    pub fn resolve_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        if self.store_path == Path::new(DEFAULT_STORE_PATH) {
            Ok(xdg::workspace_data_dir(workspace_root)?.join("session"))
        } else {
            Ok(workspace_root.join(&self.store_path))
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            store_path: default_store_path(),
        }
    }
}
