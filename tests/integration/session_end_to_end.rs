use filehunt::action::{ActionKind, AppKind};
use filehunt::report::MemoryChannel;
use filehunt::scoring::{Criterion, ScenarioConstants};
use filehunt::session::Session;
use filehunt::store::MemorySnapshotStore;
use filehunt::tree::{FileKind, SearchFilters, SizeComparison, SizeFilter, SortOrder, DEFAULT_SEED};
use filehunt::types::path_of;

fn session() -> (Session, MemoryChannel) {
    let channel = MemoryChannel::new();
    let session = Session::new(
        Box::new(MemorySnapshotStore::new()),
        Box::new(channel.clone()),
        ScenarioConstants::default(),
        DEFAULT_SEED,
    )
    .unwrap();
    (session, channel)
}

#[test]
fn well_aimed_drill_scores_full_marks() {
    let (mut session, channel) = session();
    session.open_app(AppKind::FileExplorer, None).unwrap();
    session.navigate(&path_of(&["This PC"])).unwrap();
    session.navigate(&path_of(&["This PC", "Documents"])).unwrap();

    let filters = SearchFilters {
        kind: Some(FileKind::Pdf),
        size: Some(SizeFilter {
            comparison: SizeComparison::Gt,
            value_kb: 1024,
        }),
        date: None,
    };
    let ideal = path_of(&["This PC", "Documents", "Resurse 2023"]);
    let listed = session
        .list(&ideal, "manual", &filters, SortOrder::default())
        .unwrap()
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(session.live_score(), 100);

    let mut target = ideal.clone();
    target.push("Manual utilizator imprimantă.pdf".to_string());
    assert!(session.open_file(&target).unwrap().applied);

    let result = session.evaluation().cloned().unwrap();
    assert_eq!(result.score, 100);
    assert_eq!(result.details[0].criterion, Criterion::TargetFound);
    assert!(result.details[0].passed);
    let date = result
        .details
        .iter()
        .find(|d| d.criterion == Criterion::DateFilter)
        .unwrap();
    assert!(!date.passed);

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].score, 100);
    assert_eq!(sent[0].total_tasks, 8);
    assert_eq!(sent[0].tasks_completed, 7);
}

#[test]
fn wandering_drill_is_clamped_to_zero() {
    let (mut session, channel) = session();
    for folder in ["Downloads", "Local Disk (C:)"] {
        session.navigate(&path_of(&["This PC", folder])).unwrap();
    }
    session
        .navigate(&path_of(&["This PC", "Local Disk (C:)", "Windows"]))
        .unwrap();

    let result = session.evaluate().unwrap();
    assert_eq!(result.score, 0);
    assert!(!result.target_found());
    assert_eq!(session.log().count(ActionKind::Navigate), 3);
    assert_eq!(channel.sent().len(), 1);
    assert!(session.live_score() >= 10);
}

#[test]
fn tree_edits_do_not_touch_the_log() {
    let (mut session, _) = session();
    let work = path_of(&["This PC", "Documents", "Work"]);
    session.create_folder(&work, "Drafts").unwrap();
    session
        .rename(&path_of(&["This PC", "Documents", "Work", "Drafts"]), "Final")
        .unwrap();
    session
        .delete(&path_of(&["This PC", "Documents", "Work", "Final"]))
        .unwrap();
    session
        .restore(&path_of(&["This PC", "Recycle Bin", "Final"]))
        .unwrap();
    assert!(session.log().is_empty());
    assert_eq!(session.live_score(), 100);
}
