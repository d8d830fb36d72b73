//! Folder listing with text and advanced filters
//!
//! This is the explorer's per-folder view: the same filter record is carried
//! by SEARCH actions, so what the user filtered on is what gets scored.

use crate::tree::node::{FileKind, FileNode, Node};
use crate::tree::path::resolve;
use crate::tree::search::name_matches;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeComparison {
    Gt,
    Lt,
}

/// Size bound in KB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeFilter {
    pub comparison: SizeComparison,
    pub value_kb: u64,
}

/// Only files modified at or after `since`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilter {
    pub since: DateTime<Utc>,
}

/// Advanced explorer filters; each one is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateFilter>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.size.is_none() && self.date.is_none()
    }

    pub fn accepts(&self, file: &FileNode) -> bool {
        if self.kind.is_some_and(|kind| kind != file.kind) {
            return false;
        }
        if let Some(size) = self.size {
            let within = match size.comparison {
                SizeComparison::Gt => file.size_kb > size.value_kb,
                SizeComparison::Lt => file.size_kb < size.value_kb,
            };
            if !within {
                return false;
            }
        }
        if let Some(date) = self.date {
            if file.modified_at < date.since {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Kind,
    Modified,
    Size,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "kind" | "type" => Ok(SortKey::Kind),
            "modified" | "date" => Ok(SortKey::Modified),
            "size" => Ok(SortKey::Size),
            other => Err(format!(
                "Invalid sort key: {} (must be name, kind, modified or size)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

/// List a folder's children matching `query` and `filters`, folders first.
///
/// Folders and drives always pass the advanced filters. An unresolvable path
/// or a file path lists nothing.
pub fn list_folder<'a>(
    tree: &'a Node,
    path: &[String],
    query: &str,
    filters: &SearchFilters,
    order: SortOrder,
) -> Vec<&'a Node> {
    let Some(children) = resolve(tree, path).and_then(Node::children) else {
        return Vec::new();
    };
    let mut listed: Vec<&Node> = children
        .iter()
        .filter(|n| query.is_empty() || name_matches(n.name(), query))
        .filter(|n| n.as_file().map_or(true, |f| filters.accepts(f)))
        .collect();
    listed.sort_by(|a, b| compare(a, b, order));
    listed
}

fn compare(a: &Node, b: &Node, order: SortOrder) -> Ordering {
    match (a.is_container(), b.is_container()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let by_key = match order.key {
        SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortKey::Kind => a.type_label().cmp(b.type_label()),
        SortKey::Modified => {
            let at = |n: &Node| n.as_file().map(|f| f.modified_at);
            at(a).cmp(&at(b))
        }
        SortKey::Size => {
            let size = |n: &Node| n.as_file().map(|f| f.size_kb);
            size(a).cmp(&size(b))
        }
    };
    if order.descending {
        by_key.reverse()
    } else {
        by_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::path_of;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn tree() -> Node {
        Node::folder(
            "this-pc",
            "This PC",
            vec![Node::folder(
                "res",
                "Resurse",
                vec![
                    Node::file("big", "Manual mare.pdf", FileKind::Pdf, 2100, now() - Duration::days(14)),
                    Node::file("small", "Manual mic.pdf", FileKind::Pdf, 500, now() - Duration::days(90)),
                    Node::file("xls", "Facturi.xlsx", FileKind::Spreadsheet, 1500, now() - Duration::days(1)),
                    Node::folder("sub", "Zeta", vec![]),
                ],
            )],
        )
    }

    fn ids(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_folders_first_then_name() {
        let t = tree();
        let listed = list_folder(
            &t,
            &path_of(&["This PC", "Resurse"]),
            "",
            &SearchFilters::default(),
            SortOrder::default(),
        );
        assert_eq!(ids(&listed), vec!["sub", "xls", "big", "small"]);
    }

    #[test]
    fn test_filters_combine_and_keep_folders() {
        let t = tree();
        let filters = SearchFilters {
            kind: Some(FileKind::Pdf),
            size: Some(SizeFilter {
                comparison: SizeComparison::Gt,
                value_kb: 1024,
            }),
            date: Some(DateFilter {
                since: now() - Duration::days(30),
            }),
        };
        let listed = list_folder(
            &t,
            &path_of(&["This PC", "Resurse"]),
            "",
            &filters,
            SortOrder::default(),
        );
        assert_eq!(ids(&listed), vec!["sub", "big"]);
    }

    #[test]
    fn test_query_and_descending_size() {
        let t = tree();
        let listed = list_folder(
            &t,
            &path_of(&["This PC", "Resurse"]),
            "manual",
            &SearchFilters::default(),
            SortOrder {
                key: SortKey::Size,
                descending: true,
            },
        );
        assert_eq!(ids(&listed), vec!["big", "small"]);
    }

    #[test]
    fn test_unresolvable_lists_nothing() {
        let t = tree();
        let listed = list_folder(
            &t,
            &path_of(&["This PC", "Nope"]),
            "",
            &SearchFilters::default(),
            SortOrder::default(),
        );
        assert!(listed.is_empty());
    }

    #[test]
    fn test_lt_comparison_is_strict() {
        let t = tree();
        let filters = SearchFilters {
            size: Some(SizeFilter {
                comparison: SizeComparison::Lt,
                value_kb: 500,
            }),
            ..SearchFilters::default()
        };
        let listed = list_folder(
            &t,
            &path_of(&["This PC", "Resurse"]),
            "",
            &filters,
            SortOrder::default(),
        );
        assert_eq!(ids(&listed), vec!["sub"]);
    }
}
