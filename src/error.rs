//! Error types.
//!
//! Tree, search, and scoring operations never fail: a missing path or a name
//! collision degrades to an unchanged tree. These errors cover the ambient
//! layers around them (snapshot storage, configuration, logging, reporting).

use thiserror::Error;

/// Snapshot storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid storage path: {0}")]
    InvalidPath(String),
}

/// Top-level error for session, CLI, and collaborator setup
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("report channel error: {0}")]
    ReportFailed(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Why a tree gesture left the tree unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NoOpReason {
    /// Path resolution failed (or the node is not a container when one is needed)
    NotFound,
    /// A sibling with the same name already exists
    DuplicateName,
    /// The restore destination no longer exists
    RestoreTargetMissing,
    /// The gesture is acknowledged but intentionally does nothing
    Reserved,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoOpReason::NotFound => "path not found",
            NoOpReason::DuplicateName => "name already exists",
            NoOpReason::RestoreTargetMissing => "original location no longer exists",
            NoOpReason::Reserved => "not supported",
        };
        f.write_str(text)
    }
}
