//! Scoring Engine
//!
//! Pure functions over the action log. `live_score` is recomputed after
//! every append for continuous feedback; `finalize` produces the one-time
//! evaluation that gets reported to the host. Both read the same scenario
//! constants and share the path relevance rules defined here.

pub mod evaluation;
pub mod hint;
pub mod live;

pub use evaluation::{finalize, Criterion, DetailLine, EvaluationResult, MAX_SCORE};
pub use hint::{next_hint, Hint};
pub use live::{live_score, LIVE_SCORE_MAX, LIVE_SCORE_MIN};

use crate::action::SearchRecord;
use crate::tree::{is_prefix, FileKind, SizeComparison};
use crate::types::{path_of, NodeId, NodePath};
use serde::{Deserialize, Serialize};

/// What the exercise asks for: which file, where it lives, and what a
/// well-aimed search for it looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConstants {
    pub target_id: NodeId,
    pub ideal_path: NodePath,
    pub target_kind: FileKind,
    /// Size class of the target: a `gt` filter at or above this many KB is correct
    pub size_threshold_kb: u64,
    /// Lowercase query fragments that count as relevant keywords
    pub keywords: Vec<String>,
}

impl Default for ScenarioConstants {
    fn default() -> Self {
        Self {
            target_id: "file-1".to_string(),
            ideal_path: path_of(&["This PC", "Documents", "Resurse 2023"]),
            target_kind: FileKind::Pdf,
            size_threshold_kb: 1024,
            keywords: vec![
                "manual".to_string(),
                "utilizator".to_string(),
                "imprimant".to_string(),
            ],
        }
    }
}

impl ScenarioConstants {
    /// A navigation is relevant when it lies on the way to the ideal folder
    /// or inside it.
    pub fn is_relevant(&self, path: &[String]) -> bool {
        is_prefix(path, &self.ideal_path) || is_prefix(&self.ideal_path, path)
    }

    /// The ideal folder itself or anything below it
    pub fn reaches_ideal(&self, path: &[String]) -> bool {
        is_prefix(&self.ideal_path, path)
    }

    pub fn has_keyword(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.keywords.iter().any(|k| query.contains(k.as_str()))
    }

    pub fn type_filter_correct(&self, search: &SearchRecord<'_>) -> bool {
        search.filters.kind == Some(self.target_kind)
    }

    pub fn size_filter_correct(&self, search: &SearchRecord<'_>) -> bool {
        search.filters.size.is_some_and(|size| {
            size.comparison == SizeComparison::Gt && size.value_kb >= self.size_threshold_kb
        })
    }
}
