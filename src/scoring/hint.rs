//! Hint selection
//!
//! At most one hint per session. Display duration is the UI's concern.

use crate::action::ActionLog;
use crate::scoring::ScenarioConstants;
use serde::{Deserialize, Serialize};
use std::fmt;

const LOST_AFTER_NAVIGATIONS: usize = 5;
const UNFILTERED_AFTER_SEARCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// Many navigations, none into the ideal folder
    Folder,
    /// Several searches, the latest without a type filter
    Filters,
}

impl Hint {
    pub fn message(self, constants: &ScenarioConstants) -> String {
        match self {
            Hint::Folder => format!(
                "Hint: the file you are looking for is in the '{}' folder.",
                constants
                    .ideal_path
                    .last()
                    .map(String::as_str)
                    .unwrap_or_default()
            ),
            Hint::Filters => {
                "Hint: try the advanced filters to narrow the search by file type.".to_string()
            }
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Folder => f.write_str("folder"),
            Hint::Filters => f.write_str("filters"),
        }
    }
}

/// Pick the hint to show now, if any.
pub fn next_hint(log: &ActionLog, constants: &ScenarioConstants, already_shown: bool) -> Option<Hint> {
    if already_shown {
        return None;
    }

    let folder_name = constants.ideal_path.last()?;
    if log.navigations().count() >= LOST_AFTER_NAVIGATIONS
        && !log.navigations().any(|p| p.contains(folder_name))
    {
        return Some(Hint::Folder);
    }

    if log.searches().count() >= UNFILTERED_AFTER_SEARCHES
        && log.last_search().is_some_and(|s| s.filters.kind.is_none())
    {
        return Some(Hint::Filters);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionPayload;
    use crate::tree::{FileKind, SearchFilters};
    use crate::types::path_of;

    fn navs(count: usize, segments: &[&str]) -> ActionLog {
        (0..count).fold(ActionLog::new(), |log, _| {
            log.append(ActionPayload::Navigate {
                path: path_of(segments),
            })
        })
    }

    fn search(log: ActionLog, kind: Option<FileKind>) -> ActionLog {
        log.append(ActionPayload::Search {
            query: "x".into(),
            filters: SearchFilters {
                kind,
                ..SearchFilters::default()
            },
        })
    }

    #[test]
    fn test_folder_hint_after_lost_navigation() {
        let c = ScenarioConstants::default();
        assert_eq!(next_hint(&navs(4, &["This PC", "Downloads"]), &c, false), None);
        assert_eq!(
            next_hint(&navs(5, &["This PC", "Downloads"]), &c, false),
            Some(Hint::Folder)
        );
        assert_eq!(
            next_hint(&navs(5, &["This PC", "Documents", "Resurse 2023"]), &c, false),
            None
        );
    }

    #[test]
    fn test_filters_hint_after_unfiltered_searches() {
        let c = ScenarioConstants::default();
        let log = search(search(search(ActionLog::new(), None), None), None);
        assert_eq!(next_hint(&log, &c, false), Some(Hint::Filters));
        let filtered = search(log, Some(FileKind::Pdf));
        assert_eq!(next_hint(&filtered, &c, false), None);
    }

    #[test]
    fn test_only_one_hint_per_session() {
        let c = ScenarioConstants::default();
        assert_eq!(next_hint(&navs(6, &["This PC", "Downloads"]), &c, true), None);
        assert!(Hint::Folder.message(&c).contains("Resurse 2023"));
    }
}
