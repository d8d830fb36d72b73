use clap::{CommandFactory, Parser};
use filehunt::tooling::cli::{Cli, Commands};
use filehunt::tree::{FileKind, SortKey};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["filehunt", "ls"],
        vec!["filehunt", "ls", "This PC/Documents", "--sort", "size", "--desc"],
        vec!["filehunt", "ls", "This PC/Documents", "--query", "manual", "--kind", "pdf"],
        vec!["filehunt", "cd", "This PC/Documents"],
        vec!["filehunt", "search", "manual"],
        vec!["filehunt", "find", "manual", "--larger-than", "1024", "--since-days", "30"],
        vec!["filehunt", "open", "This PC/Documents/Resurse 2023/Manual instalare.pdf"],
        vec!["filehunt", "app", "notepad"],
        vec!["filehunt", "app", "explorer", "--path", "This PC"],
        vec!["filehunt", "mkdir", "This PC/Downloads", "New folder"],
        vec!["filehunt", "rename", "This PC/Downloads", "Descărcări"],
        vec!["filehunt", "rm", "This PC/Downloads"],
        vec!["filehunt", "restore", "This PC/Recycle Bin/Downloads"],
        vec!["filehunt", "purge", "This PC/Recycle Bin/Downloads"],
        vec!["filehunt", "score"],
        vec!["filehunt", "evaluate", "--format", "json"],
        vec!["filehunt", "status"],
        vec!["filehunt", "reset"],
        vec!["filehunt", "config", "show"],
        vec!["filehunt", "--config", "filehunt.toml", "config", "show"],
        vec!["filehunt", "--workspace", "/tmp", "--log-level", "debug", "status"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_conflicting_size_filters() {
    let parsed = Cli::try_parse_from([
        "filehunt",
        "find",
        "manual",
        "--larger-than",
        "10",
        "--smaller-than",
        "20",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn parse_rejects_unknown_values() {
    assert!(Cli::try_parse_from(["filehunt", "find", "x", "--kind", "mp3"]).is_err());
    assert!(Cli::try_parse_from(["filehunt", "app", "paint"]).is_err());
    assert!(Cli::try_parse_from(["filehunt", "ls", "--sort", "color"]).is_err());
}

#[test]
fn parse_rejects_negative_age() {
    assert!(Cli::try_parse_from(["filehunt", "find", "x", "--since-days", "-3"]).is_err());
    assert!(Cli::try_parse_from(["filehunt", "find", "x", "--since-days=-3"]).is_err());
}

#[test]
fn parse_maps_filter_aliases() {
    let cli = Cli::try_parse_from([
        "filehunt", "ls", "This PC", "--kind", "xlsx", "--sort", "date",
    ])
    .unwrap();
    match cli.command {
        Commands::Ls { filters, sort, .. } => {
            assert_eq!(filters.kind, Some(FileKind::Spreadsheet));
            assert_eq!(sort, SortKey::Modified);
        }
        _ => panic!("expected ls"),
    }
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
