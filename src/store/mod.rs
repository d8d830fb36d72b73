//! Session Snapshot Store
//!
//! The persistence collaborator: `load` once at session start, `save` after
//! each committed gesture. The session is the only writer.

pub mod persistence;

use crate::action::ActionLog;
use crate::error::StorageError;
use crate::scoring::EvaluationResult;
use crate::tree::Node;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use persistence::SledSnapshotStore;

/// Serialized session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tree: Node,
    pub log: ActionLog,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub hint_shown: bool,
    /// Next suffix for ids of user-created folders; ids are never reused
    #[serde(default)]
    pub next_folder_seq: u64,
    /// Final evaluation, once it has been reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResult>,
}

impl SessionSnapshot {
    pub fn fresh(tree: Node, started_at: DateTime<Utc>) -> Self {
        Self {
            tree,
            log: ActionLog::new(),
            started_at,
            hint_shown: false,
            next_folder_seq: 0,
            evaluation: None,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a stored snapshot; timestamps come back as `DateTime<Utc>`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Load/save contract for session snapshots
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when nothing was saved yet; `Err` when stored data is unreadable.
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process store; clones share the same slot
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding arbitrary bytes, e.g. a corrupted snapshot
    pub fn with_raw(bytes: Vec<u8>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(bytes))),
        }
    }

    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot.lock().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        self.slot
            .lock()
            .as_deref()
            .map(SessionSnapshot::from_bytes)
            .transpose()
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let bytes = snapshot.to_bytes()?;
        *self.slot.lock() = Some(bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock() = None;
        Ok(())
    }
}
