//! Whole-tree name search

use crate::tree::node::Node;
use crate::tree::path::is_in_recycle_bin;
use crate::types::NodePath;
use unicode_normalization::UnicodeNormalization;

/// One search match with its full path from the root
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub node: &'a Node,
    pub path: NodePath,
}

/// Case-insensitive comparison key. NFC first so that a decomposed `ă`
/// typed by the user matches the precomposed one stored in the tree.
pub(crate) fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Case-insensitive substring test over folded text
pub fn name_matches(name: &str, query: &str) -> bool {
    fold(name).contains(&fold(query))
}

/// Pre-order depth-first search for nodes whose name contains `query`.
///
/// The root is never a match and nothing at or below the Recycle Bin is
/// returned. A blank query matches nothing.
pub fn search<'a>(tree: &'a Node, query: &str) -> Vec<SearchHit<'a>> {
    let mut hits = Vec::new();
    if query.trim().is_empty() {
        return hits;
    }
    let needle = fold(query);
    let mut current = vec![tree.name().to_string()];
    if let Some(children) = tree.children() {
        for child in children {
            visit(child, &needle, &mut current, &mut hits);
        }
    }
    hits
}

fn visit<'a>(node: &'a Node, needle: &str, current: &mut NodePath, hits: &mut Vec<SearchHit<'a>>) {
    current.push(node.name().to_string());
    if !is_in_recycle_bin(current) {
        if fold(node.name()).contains(needle) {
            hits.push(SearchHit {
                node,
                path: current.clone(),
            });
        }
        if let Some(children) = node.children() {
            for child in children {
                visit(child, needle, current, hits);
            }
        }
    }
    current.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::FileKind;
    use crate::tree::ops::soft_delete;
    use crate::types::path_of;
    use chrono::{TimeZone, Utc};

    fn tree() -> Node {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        Node::folder(
            "this-pc",
            "This PC",
            vec![
                Node::folder(
                    "documents",
                    "Documents",
                    vec![
                        Node::folder(
                            "manuals",
                            "Manuals",
                            vec![Node::file("m1", "Manual instalare.pdf", FileKind::Pdf, 500, at)],
                        ),
                        Node::file("m2", "Manual utilizator imprimantă.pdf", FileKind::Pdf, 2100, at),
                    ],
                ),
                Node::folder("recycle-bin", "Recycle Bin", vec![]),
            ],
        )
    }

    #[test]
    fn test_search_preorder_and_case_insensitive() {
        let t = tree();
        let hits = search(&t, "MANUAL");
        let names: Vec<&str> = hits.iter().map(|h| h.node.name()).collect();
        assert_eq!(
            names,
            vec!["Manuals", "Manual instalare.pdf", "Manual utilizator imprimantă.pdf"]
        );
        assert_eq!(
            hits[1].path,
            path_of(&["This PC", "Documents", "Manuals", "Manual instalare.pdf"])
        );
    }

    #[test]
    fn test_search_normalizes_diacritics_form() {
        let t = tree();
        // "a" followed by a combining breve, the decomposed form of "ă"
        let hits = search(&t, "imprimant\u{0061}\u{0306}");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node.id(), "m2");
    }

    #[test]
    fn test_search_skips_root_bin_and_blank_queries() {
        let t = soft_delete(&tree(), &path_of(&["This PC", "Documents", "Manuals"]));
        assert!(search(&t, "This PC").is_empty());
        assert!(search(&t, "Recycle").is_empty());
        assert!(search(&t, "   ").is_empty());
        let hits = search(&t, "manual");
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|h| !is_in_recycle_bin(&h.path)));
    }
}
