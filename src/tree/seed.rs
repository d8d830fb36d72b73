//! Initial tree for a drill session
//!
//! The target file and its named decoys are fixed; the filler files around
//! them are generated from a seeded RNG so a given seed always yields the
//! same tree.

use crate::tree::node::{FileKind, Node};
use crate::types::{RECYCLE_BIN_NAME, ROOT_NAME};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Default RNG seed for filler files
pub const DEFAULT_SEED: u64 = 2023;

const FILE_NOUNS: [&str; 9] = [
    "Raport", "Document", "Prezentare", "Buget", "Factura", "Contract", "Proiect", "Notite", "Plan",
];
const FILE_ADJECTIVES: [&str; 7] = [
    "Final", "Provizoriu", "Revizuit", "Anual", "Trimestrial", "Urgent", "Important",
];
const IMAGE_PREFIXES: [&str; 5] = ["IMG", "DSC", "FOTO", "VACANTA", "SCREENSHOT"];

/// Build the seed tree relative to `now`.
pub fn seed_tree(now: DateTime<Utc>, seed: u64) -> Node {
    let mut filler = FillerGenerator::new(now, seed);
    let days_ago = |days: i64| now - Duration::days(days);

    let mut resurse = vec![
        Node::file(
            "file-1",
            "Manual utilizator imprimantă.pdf",
            FileKind::Pdf,
            2100,
            days_ago(14),
        ),
        Node::file("file-2", "Manual instalare.pdf", FileKind::Pdf, 500, days_ago(90)),
        Node::file("file-3", "Facturi 2023.xlsx", FileKind::Spreadsheet, 1500, days_ago(1)),
    ];
    filler.extend(&mut resurse, 50, "resurse-extra");

    Node::folder(
        "this-pc",
        ROOT_NAME,
        vec![
            Node::folder(
                "documents",
                "Documents",
                vec![
                    Node::folder("resurse-2023", "Resurse 2023", resurse),
                    Node::folder("proiecte", "Proiecte", filler.files(18, "proj")),
                    Node::folder("financiar", "Financiar", filler.files(15, "fin")),
                    Node::folder("media", "Media", filler.files(20, "med")),
                    Node::folder("work-docs", "Work", Vec::new()),
                ],
            ),
            Node::folder("downloads", "Downloads", Vec::new()),
            Node::drive(
                "c-drive",
                "Local Disk (C:)",
                vec![
                    Node::folder("windows", "Windows", Vec::new()),
                    Node::folder("users", "Users", Vec::new()),
                ],
            ),
            Node::folder("recycle-bin", RECYCLE_BIN_NAME, Vec::new()),
        ],
    )
}

struct FillerGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl FillerGenerator {
    fn new(now: DateTime<Utc>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    fn files(&mut self, count: usize, id_prefix: &str) -> Vec<Node> {
        let mut out = Vec::with_capacity(count);
        self.extend(&mut out, count, id_prefix);
        out
    }

    /// Append `count` generated files, skipping names already in `folder`.
    fn extend(&mut self, folder: &mut Vec<Node>, count: usize, id_prefix: &str) {
        let mut taken: HashSet<String> = folder.iter().map(|n| n.name().to_string()).collect();
        for i in 0..count {
            let file = loop {
                let candidate = self.file(format!("{}-{}", id_prefix, i));
                if taken.insert(candidate.name().to_string()) {
                    break candidate;
                }
            };
            folder.push(file);
        }
    }

    fn file(&mut self, id: String) -> Node {
        let kind = FileKind::ALL[self.rng.random_range(0..FileKind::ALL.len())];
        let name = if kind.is_image() {
            format!(
                "{}_{}.{}",
                IMAGE_PREFIXES[self.rng.random_range(0..IMAGE_PREFIXES.len())],
                self.rng.random_range(1000..=9999),
                kind.extension()
            )
        } else {
            format!(
                "{}-{}-{}.{}",
                FILE_NOUNS[self.rng.random_range(0..FILE_NOUNS.len())],
                FILE_ADJECTIVES[self.rng.random_range(0..FILE_ADJECTIVES.len())],
                self.rng.random_range(1..=100),
                kind.extension()
            )
        };
        let size_kb = self.rng.random_range(10..=8000);
        let modified_at = self.now - Duration::days(self.rng.random_range(1..=365));
        Node::file(id, name, kind, size_kb, modified_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::path::{all_paths, resolve};
    use crate::types::path_of;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_contains_target_in_ideal_folder() {
        let tree = seed_tree(now(), DEFAULT_SEED);
        let target = resolve(
            &tree,
            &path_of(&[
                "This PC",
                "Documents",
                "Resurse 2023",
                "Manual utilizator imprimantă.pdf",
            ]),
        )
        .and_then(Node::as_file)
        .unwrap();
        assert_eq!(target.id, "file-1");
        assert_eq!(target.size_kb, 2100);
        assert_eq!(target.modified_at, now() - Duration::days(14));
    }

    #[test]
    fn test_seed_is_deterministic_per_seed() {
        assert_eq!(seed_tree(now(), 7), seed_tree(now(), 7));
        assert_ne!(seed_tree(now(), 7), seed_tree(now(), 8));
    }

    #[test]
    fn test_seed_ids_and_sibling_names_unique() {
        let tree = seed_tree(now(), DEFAULT_SEED);
        let paths = all_paths(&tree);
        let unique_paths: HashSet<_> = paths.iter().collect();
        assert_eq!(unique_paths.len(), paths.len());

        let ids: HashSet<String> = paths
            .iter()
            .map(|p| resolve(&tree, p).unwrap().id().to_string())
            .collect();
        assert_eq!(ids.len(), paths.len());

        let resurse = resolve(&tree, &path_of(&["This PC", "Documents", "Resurse 2023"])).unwrap();
        assert_eq!(resurse.children().unwrap().len(), 53);
    }

    #[test]
    fn test_recycle_bin_starts_empty() {
        let tree = seed_tree(now(), DEFAULT_SEED);
        let bin = resolve(&tree, &path_of(&["This PC", "Recycle Bin"])).unwrap();
        assert!(bin.children().unwrap().is_empty());
    }
}
