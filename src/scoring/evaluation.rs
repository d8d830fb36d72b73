//! Final evaluation: additive 0-100 score with one annotated line per criterion

use crate::action::ActionLog;
use crate::scoring::ScenarioConstants;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const MAX_SCORE: u32 = 100;

const TARGET_FOUND_POINTS: i64 = 40;
const IDEAL_FOLDER_POINTS: i64 = 15;
const IRRELEVANT_NAV_PENALTY: i64 = 5;
const TOLERATED_MISSES: usize = 1;
const USED_SEARCH_POINTS: i64 = 5;
const KEYWORD_POINTS: i64 = 10;
const TYPE_FILTER_POINTS: i64 = 15;
const SIZE_FILTER_POINTS: i64 = 15;
const DATE_FILTER_POINTS: i64 = 5;

const FEEDBACK_FOUND: &str = "Analysis of your performance:";
const FEEDBACK_NOT_FOUND: &str =
    "Next time, try to use the search tools more efficiently.";

/// Scored criteria, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TargetFound,
    IdealFolder,
    IrrelevantNavigation,
    UsedSearch,
    Keyword,
    TypeFilter,
    SizeFilter,
    DateFilter,
}

/// One pass/fail line of the evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLine {
    pub criterion: Criterion,
    pub passed: bool,
    pub message: String,
}

impl DetailLine {
    fn new(criterion: Criterion, passed: bool, message: impl Into<String>) -> Self {
        Self {
            criterion,
            passed,
            message: message.into(),
        }
    }
}

impl fmt::Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { '✓' } else { '✗' };
        write!(f, "{} {}", mark, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u32,
    pub feedback: String,
    pub details: Vec<DetailLine>,
}

impl EvaluationResult {
    pub fn target_found(&self) -> bool {
        self.details
            .iter()
            .any(|d| d.criterion == Criterion::TargetFound && d.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.details.iter().filter(|d| d.passed).count()
    }

    /// Rendered lines, `✓`/`✗` prefixed
    pub fn detail_strings(&self) -> Vec<String> {
        self.details.iter().map(ToString::to_string).collect()
    }
}

/// Tally the log against the scenario.
///
/// Total over any log: absent entries simply fail their criterion. The
/// "target found" line is always first.
pub fn finalize(log: &ActionLog, constants: &ScenarioConstants) -> EvaluationResult {
    let mut points: i64 = 0;
    let mut details = Vec::with_capacity(8);

    let found = log.opened(&constants.target_id);
    if found {
        points += TARGET_FOUND_POINTS;
        details.push(DetailLine::new(
            Criterion::TargetFound,
            true,
            "Congratulations, you found the correct file!",
        ));
    } else {
        details.push(DetailLine::new(
            Criterion::TargetFound,
            false,
            "You did not find the correct file in the allotted time.",
        ));
    }

    let reached = log.navigations().any(|p| constants.reaches_ideal(p));
    if reached {
        points += IDEAL_FOLDER_POINTS;
        details.push(DetailLine::new(
            Criterion::IdealFolder,
            true,
            "You reached the folder that holds the file.",
        ));
    } else {
        details.push(DetailLine::new(
            Criterion::IdealFolder,
            false,
            format!(
                "You never opened the '{}' folder.",
                constants.ideal_path.last().map(String::as_str).unwrap_or_default()
            ),
        ));
    }

    let irrelevant: BTreeSet<&Vec<String>> = log
        .navigations()
        .filter(|p| !constants.is_relevant(p))
        .collect();
    let penalized = irrelevant.len().saturating_sub(TOLERATED_MISSES);
    if penalized == 0 {
        details.push(DetailLine::new(
            Criterion::IrrelevantNavigation,
            true,
            match irrelevant.len() {
                0 => "You navigated efficiently toward the correct folder.".to_string(),
                _ => "One detour into an unrelated folder was tolerated.".to_string(),
            },
        ));
    } else {
        points -= penalized as i64 * IRRELEVANT_NAV_PENALTY;
        details.push(DetailLine::new(
            Criterion::IrrelevantNavigation,
            false,
            format!("You navigated into {} irrelevant folders.", irrelevant.len()),
        ));
    }

    match log.last_search() {
        None => {
            details.push(DetailLine::new(
                Criterion::UsedSearch,
                false,
                "You did not use the advanced search at all.",
            ));
            for (criterion, message) in [
                (Criterion::Keyword, "No search query to check for keywords."),
                (Criterion::TypeFilter, "No file type filter was applied."),
                (Criterion::SizeFilter, "No size filter was applied."),
                (Criterion::DateFilter, "No modification date filter was applied."),
            ] {
                details.push(DetailLine::new(criterion, false, message));
            }
        }
        Some(search) => {
            points += USED_SEARCH_POINTS;
            details.push(DetailLine::new(
                Criterion::UsedSearch,
                true,
                "You used the search function.",
            ));

            let keyword = constants.has_keyword(search.query);
            if keyword {
                points += KEYWORD_POINTS;
            }
            details.push(DetailLine::new(
                Criterion::Keyword,
                keyword,
                if keyword {
                    "You used relevant keywords in the search."
                } else {
                    "Your search query did not contain a relevant keyword."
                },
            ));

            let type_ok = constants.type_filter_correct(&search);
            if type_ok {
                points += TYPE_FILTER_POINTS;
            }
            details.push(DetailLine::new(
                Criterion::TypeFilter,
                type_ok,
                if type_ok {
                    "You used the file type filter correctly.".to_string()
                } else {
                    format!("You did not filter by file type (.{}).", constants.target_kind)
                },
            ));

            let size_ok = constants.size_filter_correct(&search);
            if size_ok {
                points += SIZE_FILTER_POINTS;
            }
            details.push(DetailLine::new(
                Criterion::SizeFilter,
                size_ok,
                if size_ok {
                    "You used the size filter correctly.".to_string()
                } else {
                    format!(
                        "You did not use the size filter (> {} KB).",
                        constants.size_threshold_kb
                    )
                },
            ));

            let dated = search.filters.date.is_some();
            if dated {
                points += DATE_FILTER_POINTS;
            }
            details.push(DetailLine::new(
                Criterion::DateFilter,
                dated,
                if dated {
                    "You used the modification date filter."
                } else {
                    "You did not use the modification date filter."
                },
            ));
        }
    }

    EvaluationResult {
        score: points.clamp(0, MAX_SCORE as i64) as u32,
        feedback: (if found { FEEDBACK_FOUND } else { FEEDBACK_NOT_FOUND }).to_string(),
        details,
    }
}
