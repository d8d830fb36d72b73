//! Action Log
//!
//! Append-only, time-ordered record of user gestures. Entries are immutable
//! once created; the scoring engine relies on the ordering to treat the most
//! recent entry of a kind as authoritative.

use crate::tree::SearchFilters;
use crate::types::{NodeId, NodePath};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Navigate,
    Search,
    FileOpen,
    AppOpen,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Navigate => "NAVIGATE",
            ActionKind::Search => "SEARCH",
            ActionKind::FileOpen => "FILE_OPEN",
            ActionKind::AppOpen => "APP_OPEN",
        };
        f.write_str(s)
    }
}

/// Applications that can be launched from the simulated desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    FileExplorer,
    Notepad,
    Calculator,
}

impl std::str::FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "file_explorer" | "explorer" => Ok(AppKind::FileExplorer),
            "notepad" => Ok(AppKind::Notepad),
            "calculator" | "calc" => Ok(AppKind::Calculator),
            other => Err(format!(
                "Invalid app: {} (must be explorer, notepad or calculator)",
                other
            )),
        }
    }
}

/// Payload of an action, one shape per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPayload {
    Navigate {
        path: NodePath,
    },
    Search {
        query: String,
        #[serde(default)]
        filters: SearchFilters,
    },
    FileOpen {
        node_id: NodeId,
        node_name: String,
        path: NodePath,
    },
    AppOpen {
        app: AppKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<NodePath>,
    },
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::Navigate { .. } => ActionKind::Navigate,
            ActionPayload::Search { .. } => ActionKind::Search,
            ActionPayload::FileOpen { .. } => ActionKind::FileOpen,
            ActionPayload::AppOpen { .. } => ActionKind::AppOpen,
        }
    }
}

/// One recorded gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub payload: ActionPayload,
    pub timestamp: DateTime<Utc>,
}

impl ActionLogEntry {
    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }
}

/// Search payload fields, borrowed out of an entry
#[derive(Debug, Clone, Copy)]
pub struct SearchRecord<'a> {
    pub query: &'a str,
    pub filters: &'a SearchFilters,
}

/// Append-only action log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
}

impl ActionLog {
    /// Empty log, as at session start
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty log for the next session
    pub fn reset() -> Self {
        Self::default()
    }

    /// New log with `payload` appended, stamped with the current time.
    pub fn append(&self, payload: ActionPayload) -> Self {
        self.append_at(payload, Utc::now())
    }

    /// New log with `payload` appended at an explicit time.
    pub fn append_at(&self, payload: ActionPayload, timestamp: DateTime<Utc>) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(ActionLogEntry { payload, timestamp });
        Self { entries }
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }

    /// Destination paths of NAVIGATE entries, in log order
    pub fn navigations(&self) -> impl Iterator<Item = &NodePath> {
        self.entries.iter().filter_map(|e| match &e.payload {
            ActionPayload::Navigate { path } => Some(path),
            _ => None,
        })
    }

    /// SEARCH entries, in log order
    pub fn searches(&self) -> impl Iterator<Item = SearchRecord<'_>> {
        self.entries.iter().filter_map(|e| match &e.payload {
            ActionPayload::Search { query, filters } => Some(SearchRecord { query, filters }),
            _ => None,
        })
    }

    pub fn last_search(&self) -> Option<SearchRecord<'_>> {
        self.searches().last()
    }

    /// True if any FILE_OPEN entry references `node_id`
    pub fn opened(&self, node_id: &str) -> bool {
        self.entries.iter().any(|e| {
            matches!(&e.payload, ActionPayload::FileOpen { node_id: id, .. } if id == node_id)
        })
    }
}
