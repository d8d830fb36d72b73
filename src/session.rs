//! Drill session
//!
//! Owns the current tree, the action log, the snapshot store, and the result
//! channel. Each gesture applies its tree edit, appends to the log, recomputes
//! the live score, and saves the snapshot before it returns.

use crate::action::{ActionLog, ActionPayload, AppKind};
use crate::config::{FilehuntConfig, StorageBackend};
use crate::error::{ApiError, NoOpReason};
use crate::report::{channel_from_config, EvaluationMessage, ResultChannel};
use crate::scoring::{finalize, live_score, next_hint, EvaluationResult, Hint, ScenarioConstants};
use crate::store::{MemorySnapshotStore, SessionSnapshot, SledSnapshotStore, SnapshotStore};
use crate::tree::{
    create_folder, delete_permanently_node, list_folder, recycle_bin_path,
    rename_node, resolve, restore_node, search, seed_tree, soft_delete_node, Edit, Node,
    SearchFilters, SearchHit, SortOrder,
};
use crate::types::{display_path, NodePath, ROOT_NAME};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// What a gesture did. A no-op carries the reason it was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureOutcome {
    pub applied: bool,
    pub reason: Option<NoOpReason>,
}

impl GestureOutcome {
    pub fn applied() -> Self {
        Self {
            applied: true,
            reason: None,
        }
    }

    pub fn refused(reason: NoOpReason) -> Self {
        Self {
            applied: false,
            reason: Some(reason),
        }
    }
}

pub struct Session {
    store: Box<dyn SnapshotStore>,
    channel: Box<dyn ResultChannel>,
    constants: ScenarioConstants,
    rng_seed: u64,
    state: SessionSnapshot,
    live_score: u32,
}

impl Session {
    /// Resume the stored session, or start from the seed when there is none.
    ///
    /// A snapshot that cannot be decoded is discarded in favour of the seed.
    pub fn new(
        store: Box<dyn SnapshotStore>,
        channel: Box<dyn ResultChannel>,
        constants: ScenarioConstants,
        rng_seed: u64,
    ) -> Result<Self, ApiError> {
        let state = match store.load() {
            Ok(Some(snapshot)) => {
                debug!(entries = snapshot.log.len(), "Resumed stored session");
                snapshot
            }
            Ok(None) => Self::seeded(rng_seed),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, starting from the seed tree");
                if let Err(e) = store.clear() {
                    warn!(error = %e, "Could not discard the unreadable session");
                }
                Self::seeded(rng_seed)
            }
        };
        let live_score = live_score(&state.log, &constants);
        Ok(Self {
            store,
            channel,
            constants,
            rng_seed,
            state,
            live_score,
        })
    }

    /// Build the store and channel selected in configuration.
    pub fn open(config: &FilehuntConfig, workspace_root: &Path) -> Result<Self, ApiError> {
        let store: Box<dyn SnapshotStore> = match config.storage.backend {
            StorageBackend::Sled => {
                let path = config.storage.resolve_path(workspace_root)?;
                debug!(path = %path.display(), "Opening snapshot store");
                Box::new(SledSnapshotStore::open(&path)?)
            }
            StorageBackend::Memory => Box::new(MemorySnapshotStore::new()),
        };
        let channel = channel_from_config(&config.report)?;
        Self::new(
            store,
            channel,
            config.scenario.constants.clone(),
            config.scenario.rng_seed,
        )
    }

    fn seeded(rng_seed: u64) -> SessionSnapshot {
        let now = Utc::now();
        SessionSnapshot::fresh(seed_tree(now, rng_seed), now)
    }

    pub fn tree(&self) -> &Node {
        &self.state.tree
    }

    pub fn log(&self) -> &ActionLog {
        &self.state.log
    }

    pub fn constants(&self) -> &ScenarioConstants {
        &self.constants
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.state.started_at
    }

    /// Score as of the last append, in `[10, 100]`
    pub fn live_score(&self) -> u32 {
        self.live_score
    }

    /// The reported evaluation, once there is one
    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        self.state.evaluation.as_ref()
    }

    pub fn hint_shown(&self) -> bool {
        self.state.hint_shown
    }

    /// Open a folder in the explorer view.
    pub fn navigate(&mut self, path: &[String]) -> Result<GestureOutcome, ApiError> {
        if !resolve(&self.state.tree, path).is_some_and(Node::is_container) {
            return Ok(self.refuse("navigate", NoOpReason::NotFound));
        }
        info!(path = %display_path(path), "Navigate");
        self.record(ActionPayload::Navigate {
            path: path.to_vec(),
        })?;
        Ok(GestureOutcome::applied())
    }

    /// Explorer view of a folder: navigates there and, when a query or a
    /// filter is set, records the search as well. `None` if the folder does
    /// not resolve.
    pub fn list(
        &mut self,
        path: &[String],
        query: &str,
        filters: &SearchFilters,
        order: SortOrder,
    ) -> Result<Option<Vec<&Node>>, ApiError> {
        if !self.navigate(path)?.applied {
            return Ok(None);
        }
        if !query.trim().is_empty() || !filters.is_empty() {
            self.record_search(query, filters)?;
        }
        Ok(Some(list_folder(
            &self.state.tree,
            path,
            query.trim(),
            filters,
            order,
        )))
    }

    /// Global search popover. Nothing is recorded.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        search(&self.state.tree, query)
    }

    /// Explorer search over the whole tree; records a SEARCH with its filters.
    pub fn find(
        &mut self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchHit<'_>>, ApiError> {
        self.record_search(query, filters)?;
        Ok(search(&self.state.tree, query)
            .into_iter()
            .filter(|hit| hit.node.as_file().map_or(true, |f| filters.accepts(f)))
            .collect())
    }

    /// Open a file. Opening the target ends the drill with an evaluation.
    pub fn open_file(&mut self, path: &[String]) -> Result<GestureOutcome, ApiError> {
        let Some(file) = resolve(&self.state.tree, path).and_then(Node::as_file) else {
            return Ok(self.refuse("open_file", NoOpReason::NotFound));
        };
        let payload = ActionPayload::FileOpen {
            node_id: file.id.clone(),
            node_name: file.name.clone(),
            path: path.to_vec(),
        };
        let is_target = file.id == self.constants.target_id;
        info!(path = %display_path(path), is_target, "Open file");
        self.record(payload)?;

        if is_target && self.state.evaluation.is_none() {
            self.evaluate()?;
        }
        Ok(GestureOutcome::applied())
    }

    pub fn open_app(
        &mut self,
        app: AppKind,
        path: Option<NodePath>,
    ) -> Result<GestureOutcome, ApiError> {
        info!(?app, "Open app");
        self.record(ActionPayload::AppOpen { app, path })?;
        Ok(GestureOutcome::applied())
    }

    /// "New folder" under `parent`. Ids of created folders are never reused.
    pub fn create_folder(
        &mut self,
        parent: &[String],
        name: &str,
    ) -> Result<GestureOutcome, ApiError> {
        let name = validate_name(name)?;
        let id = format!("user-folder-{}", self.state.next_folder_seq);
        let edit = create_folder(&self.state.tree, parent, name, id);
        let outcome = self.apply("create_folder", edit)?;
        if outcome.applied {
            self.state.next_folder_seq += 1;
            self.save()?;
        }
        Ok(outcome)
    }

    pub fn rename(&mut self, path: &[String], new_name: &str) -> Result<GestureOutcome, ApiError> {
        let new_name = validate_name(new_name)?;
        if is_fixed_location(path) {
            return Ok(self.refuse("rename", NoOpReason::Reserved));
        }
        let edit = rename_node(&self.state.tree, path, new_name);
        self.apply("rename", edit)
    }

    /// Soft delete into the Recycle Bin.
    pub fn delete(&mut self, path: &[String]) -> Result<GestureOutcome, ApiError> {
        let edit = soft_delete_node(&self.state.tree, path);
        self.apply("delete", edit)
    }

    /// Restore a Recycle Bin resident to where it was deleted from.
    pub fn restore(&mut self, bin_path: &[String]) -> Result<GestureOutcome, ApiError> {
        let edit = restore_node(&self.state.tree, bin_path);
        self.apply("restore", edit)
    }

    /// Acknowledged, nothing is removed.
    pub fn delete_permanently(&mut self, path: &[String]) -> Result<GestureOutcome, ApiError> {
        let edit = delete_permanently_node(&self.state.tree, path);
        self.apply("delete_permanently", edit)
    }

    /// Finalize and report. The first call sends the message; later calls
    /// return the stored result without sending again.
    pub fn evaluate(&mut self) -> Result<EvaluationResult, ApiError> {
        if let Some(done) = &self.state.evaluation {
            debug!(score = done.score, "Evaluation already reported");
            return Ok(done.clone());
        }
        let result = finalize(&self.state.log, &self.constants);
        self.channel
            .send(&EvaluationMessage::from_result(&result, Utc::now()))?;
        info!(
            score = result.score,
            passed = result.passed_count(),
            "Evaluation reported"
        );
        self.state.evaluation = Some(result.clone());
        // already reported, so a failed save must not turn into an error
        if let Err(e) = self.save() {
            warn!(error = %e, "Evaluation reported but not saved");
        }
        Ok(result)
    }

    /// The hint to show now, if any. Showing one uses up the session's hint.
    /// No hint is offered once the session has been evaluated.
    pub fn take_hint(&mut self) -> Result<Option<Hint>, ApiError> {
        if self.state.evaluation.is_some() {
            return Ok(None);
        }
        let hint = next_hint(&self.state.log, &self.constants, self.state.hint_shown);
        if let Some(hint) = hint {
            info!(%hint, "Hint shown");
            self.state.hint_shown = true;
            self.save()?;
        }
        Ok(hint)
    }

    /// Discard everything and start over from a freshly seeded tree.
    pub fn reset(&mut self) -> Result<(), ApiError> {
        self.store.clear()?;
        self.state = Self::seeded(self.rng_seed);
        self.live_score = live_score(&self.state.log, &self.constants);
        info!("Session reset");
        self.save()
    }

    fn record_search(&mut self, query: &str, filters: &SearchFilters) -> Result<(), ApiError> {
        info!(query, filtered = !filters.is_empty(), "Search");
        self.record(ActionPayload::Search {
            query: query.to_string(),
            filters: filters.clone(),
        })
    }

    fn record(&mut self, payload: ActionPayload) -> Result<(), ApiError> {
        self.state.log = self.state.log.append(payload);
        self.live_score = live_score(&self.state.log, &self.constants);
        debug!(live_score = self.live_score, entries = self.state.log.len(), "Action recorded");
        self.save()
    }

    fn apply(&mut self, op: &str, edit: Edit) -> Result<GestureOutcome, ApiError> {
        match edit {
            Ok(tree) => {
                info!(op, "Tree edited");
                self.state.tree = tree;
                self.save()?;
                Ok(GestureOutcome::applied())
            }
            Err(reason) => Ok(self.refuse(op, reason)),
        }
    }

    fn refuse(&self, op: &str, reason: NoOpReason) -> GestureOutcome {
        debug!(op, %reason, "Gesture was a no-op");
        GestureOutcome::refused(reason)
    }

    fn save(&self) -> Result<(), ApiError> {
        Ok(self.store.save(&self.state)?)
    }
}

/// The root and the Recycle Bin keep their names.
fn is_fixed_location(path: &[String]) -> bool {
    path == [ROOT_NAME] || path == recycle_bin_path().as_slice()
}

fn validate_name(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidArgument("name must not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(ApiError::InvalidArgument(format!(
            "name must not contain '/': {}",
            name
        )));
    }
    Ok(name)
}
