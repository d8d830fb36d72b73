//! Live score: continuous feedback shown while the drill is running

use crate::action::ActionLog;
use crate::scoring::ScenarioConstants;

pub const LIVE_SCORE_MAX: u32 = 100;
pub const LIVE_SCORE_MIN: u32 = 10;

/// Navigations allowed before extra on-path clicks start to cost
const FREE_NAVIGATIONS: usize = 3;
/// Navigations without any search after which the user looks stuck
const MANUAL_HUNT_THRESHOLD: usize = 4;

const IRRELEVANT_NAV_PENALTY: f64 = 10.0;
const EXTRA_NAV_PENALTY: f64 = 2.5;
const NO_SEARCH_PENALTY: f64 = 30.0;
const TYPE_FILTER_BONUS: f64 = 15.0;
const TYPE_FILTER_MISS: f64 = 10.0;
const SIZE_FILTER_BONUS: f64 = 10.0;
const SIZE_FILTER_MISS: f64 = 5.0;
const KEYWORD_BONUS: f64 = 10.0;

/// Recompute the live score from the whole log.
///
/// Starts at the maximum and moves with each signal; the result is rounded
/// and clamped to `[LIVE_SCORE_MIN, LIVE_SCORE_MAX]`.
pub fn live_score(log: &ActionLog, constants: &ScenarioConstants) -> u32 {
    let mut score = LIVE_SCORE_MAX as f64;

    let navigations: Vec<_> = log.navigations().collect();
    let irrelevant = navigations
        .iter()
        .filter(|path| !constants.is_relevant(path))
        .count();
    if irrelevant > 0 {
        score -= irrelevant as f64 * IRRELEVANT_NAV_PENALTY;
    } else if navigations.len() > FREE_NAVIGATIONS {
        score -= (navigations.len() - FREE_NAVIGATIONS) as f64 * EXTRA_NAV_PENALTY;
    }

    match log.last_search() {
        None if navigations.len() > MANUAL_HUNT_THRESHOLD => score -= NO_SEARCH_PENALTY,
        None => {}
        Some(search) => {
            if constants.type_filter_correct(&search) {
                score += TYPE_FILTER_BONUS;
            } else {
                score -= TYPE_FILTER_MISS;
            }
            if constants.size_filter_correct(&search) {
                score += SIZE_FILTER_BONUS;
            } else {
                score -= SIZE_FILTER_MISS;
            }
            if constants.has_keyword(search.query) {
                score += KEYWORD_BONUS;
            }
        }
    }

    score
        .round()
        .clamp(LIVE_SCORE_MIN as f64, LIVE_SCORE_MAX as f64) as u32
}
