//! Sled-backed snapshot persistence

use crate::error::StorageError;
use crate::store::{SessionSnapshot, SnapshotStore};
use std::path::Path;

const SNAPSHOT_TREE: &str = "snapshots";
const SESSION_KEY: &[u8] = b"session";

/// Snapshot store in a sled database directory
pub struct SledSnapshotStore {
    db: sled::Db,
    snapshots: sled::Tree,
}

impl SledSnapshotStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path)?;
        let snapshots = db.open_tree(SNAPSHOT_TREE)?;
        Ok(Self { db, snapshots })
    }

    /// Temporary database removed on drop, for ephemeral runs
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        let snapshots = db.open_tree(SNAPSHOT_TREE)?;
        Ok(Self { db, snapshots })
    }

    /// Overwrite the stored snapshot with raw bytes
    pub fn put_raw(&self, bytes: &[u8]) -> Result<(), StorageError> {
        self.snapshots.insert(SESSION_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }
}

impl SnapshotStore for SledSnapshotStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        match self.snapshots.get(SESSION_KEY)? {
            Some(bytes) => Ok(Some(SessionSnapshot::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        self.put_raw(&snapshot.to_bytes()?)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.snapshots.remove(SESSION_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionPayload;
    use crate::tree::seed_tree;
    use crate::types::path_of;
    use chrono::Utc;

    #[test]
    fn test_sled_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        let now = Utc::now();
        let mut snapshot = SessionSnapshot::fresh(seed_tree(now, 3), now);
        snapshot.log = snapshot.log.append(ActionPayload::Navigate {
            path: path_of(&["This PC", "Documents"]),
        });

        {
            let store = SledSnapshotStore::open(&path).unwrap();
            store.save(&snapshot).unwrap();
        }
        let reopened = SledSnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_sled_store_reports_corruption() {
        let store = SledSnapshotStore::temporary().unwrap();
        store.put_raw(b"\x00garbage").unwrap();
        assert!(store.load().is_err());
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
