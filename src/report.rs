//! Result Channel
//!
//! One outbound message per finalized evaluation, sent without any readiness
//! check. The message shape is fixed by the embedding host. Delivery is not
//! restricted to a receiving origin; `ReportConfig::target_origin` documents
//! the assumption and must become an allow-list before production use.

use crate::config::{ReportConfig, ReportSink};
use crate::error::ApiError;
use crate::scoring::{EvaluationResult, MAX_SCORE};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Separator between rendered detail lines in the flat `details` field
pub const DETAILS_SEPARATOR: &str = "; ";

/// Host notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub score: u32,
    pub max_score: u32,
    pub details: String,
    pub tasks_completed: u32,
    pub total_tasks: u32,
    pub extracted_text: String,
    pub timestamp: String,
}

impl EvaluationMessage {
    pub const TYPE: &'static str = "evaluationResult";

    pub fn from_result(result: &EvaluationResult, at: DateTime<Utc>) -> Self {
        let details = result.detail_strings().join(DETAILS_SEPARATOR);
        Self {
            message_type: Self::TYPE.to_string(),
            score: result.score,
            max_score: MAX_SCORE,
            extracted_text: format!(
                "Score: {}/{} - Details: {}",
                result.score, MAX_SCORE, details
            ),
            details,
            tasks_completed: result.passed_count() as u32,
            total_tasks: result.details.len() as u32,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Outbound channel to the embedding host
pub trait ResultChannel: Send + Sync {
    fn send(&self, message: &EvaluationMessage) -> Result<(), ApiError>;
}

/// Writes each message as one JSON line on stdout
pub struct StdoutChannel;

impl ResultChannel for StdoutChannel {
    fn send(&self, message: &EvaluationMessage) -> Result<(), ApiError> {
        let line = serde_json::to_string(message)
            .map_err(|e| ApiError::ReportFailed(format!("Failed to encode message: {}", e)))?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)
            .map_err(|e| ApiError::ReportFailed(format!("Failed to write to stdout: {}", e)))?;
        info!(score = message.score, "Evaluation result sent to stdout");
        Ok(())
    }
}

/// Appends each message as one JSON line to a file
pub struct JsonlFileChannel {
    path: PathBuf,
}

impl JsonlFileChannel {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ResultChannel for JsonlFileChannel {
    fn send(&self, message: &EvaluationMessage) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::ReportFailed(format!(
                    "Failed to create report directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let line = serde_json::to_string(message)
            .map_err(|e| ApiError::ReportFailed(format!("Failed to encode message: {}", e)))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ApiError::ReportFailed(format!(
                    "Failed to open report file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
        writeln!(file, "{}", line).map_err(|e| {
            ApiError::ReportFailed(format!(
                "Failed to write report file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        info!(score = message.score, path = %self.path.display(), "Evaluation result appended");
        Ok(())
    }
}

/// Keeps sent messages in memory; clones share the same buffer
#[derive(Clone, Default)]
pub struct MemoryChannel {
    sent: Arc<Mutex<Vec<EvaluationMessage>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EvaluationMessage> {
        self.sent.lock().clone()
    }
}

impl ResultChannel for MemoryChannel {
    fn send(&self, message: &EvaluationMessage) -> Result<(), ApiError> {
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Build the channel selected in configuration.
pub fn channel_from_config(config: &ReportConfig) -> Result<Box<dyn ResultChannel>, ApiError> {
    match config.sink {
        ReportSink::Stdout => Ok(Box::new(StdoutChannel)),
        ReportSink::File => {
            let path = config.file.clone().ok_or_else(|| {
                ApiError::ConfigError("report.file is required when report.sink = \"file\"".to_string())
            })?;
            Ok(Box::new(JsonlFileChannel::new(path)))
        }
    }
}
