//! Format listings, search hits, evaluations, and session status as text.

use crate::action::ActionKind;
use crate::scoring::{EvaluationResult, Hint, ScenarioConstants, MAX_SCORE};
use crate::session::{GestureOutcome, Session};
use crate::tree::{Node, SearchHit};
use crate::types::display_path;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn node_row(node: &Node) -> Vec<String> {
    match node.as_file() {
        Some(file) => vec![
            node.name().to_string(),
            node.type_label().to_string(),
            format!("{} KB", file.size_kb),
            file.modified_at.format("%Y-%m-%d %H:%M").to_string(),
        ],
        None => vec![
            node.name().to_string(),
            node.type_label().to_string(),
            "-".to_string(),
            "-".to_string(),
        ],
    }
}

/// Format one folder's contents as the explorer shows them.
pub fn format_listing_text(path: &[String], nodes: &[&Node]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&display_path(path))
    ));
    if nodes.is_empty() {
        out.push_str("This folder is empty.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Size", "Modified"]);
    for node in nodes {
        table.add_row(node_row(node));
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("{} items\n", nodes.len()));
    out
}

/// Format search hits with their full paths.
pub fn format_search_hits_text(query: &str, hits: &[SearchHit<'_>]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Results for \"{}\"", query.trim()))
    ));
    if hits.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Path"]);
    for hit in hits {
        table.add_row(vec![
            hit.node.name().to_string(),
            hit.node.type_label().to_string(),
            display_path(&hit.path),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("{} results\n", hits.len()));
    out
}

/// One line acknowledging a gesture, or saying why nothing happened.
pub fn format_outcome_text(gesture: &str, outcome: &GestureOutcome) -> String {
    match outcome.reason {
        None => format!("{} {}", "✓".green(), gesture),
        Some(reason) => format!("{} {}: {}", "✗".red(), gesture, reason),
    }
}

/// Format the final evaluation as the results screen shows it.
pub fn format_evaluation_text(result: &EvaluationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Evaluation")));
    out.push_str(&format!("  Score: {}/{}\n", result.score.bold(), MAX_SCORE));
    out.push_str(&format!("  {}\n\n", result.feedback));
    for line in &result.details {
        if line.passed {
            out.push_str(&format!("  {} {}\n", "✓".green(), line.message));
        } else {
            out.push_str(&format!("  {} {}\n", "✗".red(), line.message));
        }
    }
    out
}

pub fn format_hint_text(hint: Hint, constants: &ScenarioConstants) -> String {
    format!("{}", hint.message(constants).yellow())
}

/// Format session progress.
pub fn format_status_text(session: &Session) -> String {
    let log = session.log();
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Session")));
    out.push_str(&format!(
        "  Started: {}\n",
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("  Live score: {}\n", session.live_score()));
    out.push_str(&format!(
        "  Hint shown: {}\n",
        if session.hint_shown() { "yes" } else { "no" }
    ));
    match session.evaluation() {
        Some(result) => out.push_str(&format!(
            "  Evaluated: yes ({}/{})\n\n",
            result.score, MAX_SCORE
        )),
        None => out.push_str("  Evaluated: no\n\n"),
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Action", "Count"]);
    for kind in [
        ActionKind::Navigate,
        ActionKind::Search,
        ActionKind::FileOpen,
        ActionKind::AppOpen,
    ] {
        table.add_row(vec![kind.to_string(), log.count(kind).to_string()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
