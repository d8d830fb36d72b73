use filehunt::report::MemoryChannel;
use filehunt::scoring::ScenarioConstants;
use filehunt::session::Session;
use filehunt::store::{SledSnapshotStore, SnapshotStore};
use filehunt::tree::{resolve, DEFAULT_SEED};
use filehunt::types::path_of;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Session {
    let store = SledSnapshotStore::open(&dir.path().join("session")).unwrap();
    Session::new(
        Box::new(store),
        Box::new(MemoryChannel::new()),
        ScenarioConstants::default(),
        DEFAULT_SEED,
    )
    .unwrap()
}

#[test]
fn session_resumes_from_sled() {
    let dir = TempDir::new().unwrap();
    let downloads = path_of(&["This PC", "Downloads"]);
    {
        let mut session = open(&dir);
        session.navigate(&downloads).unwrap();
        session.create_folder(&downloads, "Installers").unwrap();
    }

    let resumed = open(&dir);
    assert_eq!(resumed.log().len(), 1);
    assert_eq!(resumed.live_score(), 90);
    let created = resolve(
        resumed.tree(),
        &path_of(&["This PC", "Downloads", "Installers"]),
    )
    .unwrap();
    assert_eq!(created.id(), "user-folder-0");
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    {
        let store = SledSnapshotStore::open(&dir.path().join("session")).unwrap();
        store.put_raw(br#"{"tree": 42}"#).unwrap();
        assert!(store.load().is_err());
    }

    let session = open(&dir);
    assert!(session.log().is_empty());
    assert!(resolve(
        session.tree(),
        &path_of(&["This PC", "Documents", "Resurse 2023"])
    )
    .is_some());
    drop(session);

    // discarded on open, before any gesture saves over it
    {
        let store = SledSnapshotStore::open(&dir.path().join("session")).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    let mut session = open(&dir);
    session.navigate(&path_of(&["This PC"])).unwrap();
    drop(session);
    assert_eq!(open(&dir).log().len(), 1);
}
