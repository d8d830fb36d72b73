//! CLI Tooling
//!
//! Command-line front end for the drill. Each invocation resumes the stored
//! session, applies one gesture, and prints the result.

use crate::action::AppKind;
use crate::config::{ConfigLoader, FilehuntConfig};
use crate::error::ApiError;
use crate::format::{
    format_evaluation_text, format_hint_text, format_listing_text, format_outcome_text,
    format_search_hits_text, format_status_text,
};
use crate::logging::LoggingConfig;
use crate::session::{GestureOutcome, Session};
use crate::tree::{
    DateFilter, FileKind, SearchFilters, SizeComparison, SizeFilter, SortKey, SortOrder,
};
use crate::types::{display_path, parse_path, NodePath, ROOT_NAME};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use parking_lot::Mutex;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Filehunt CLI - find the file in a simulated explorer
#[derive(Parser)]
#[command(name = "filehunt")]
#[command(about = "File-finding drill over a virtual file explorer, scored from your actions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the `--log-*` flags on top of the configured logging.
    pub fn apply_log_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a folder (records the navigation, and the search when filtered)
    Ls {
        /// Folder path, `/`-separated (default: This PC)
        path: Option<String>,
        /// Only names containing this text
        #[arg(long)]
        query: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort key (name, kind, modified, size)
        #[arg(long, default_value = "name")]
        sort: SortKey,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Open a folder
    Cd {
        path: String,
    },
    /// Quick search over the whole tree (not recorded)
    Search {
        query: String,
    },
    /// Explorer search over the whole tree with advanced filters
    Find {
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Open a file
    Open {
        path: String,
    },
    /// Launch an application (explorer, notepad, calculator)
    App {
        name: AppKind,
        /// Folder the application starts in
        #[arg(long)]
        path: Option<String>,
    },
    /// Create a folder
    Mkdir {
        parent: String,
        name: String,
    },
    /// Rename a file or folder
    Rename {
        path: String,
        name: String,
    },
    /// Move a file or folder to the Recycle Bin
    Rm {
        path: String,
    },
    /// Restore an item from the Recycle Bin
    Restore {
        /// Path of the item inside the Recycle Bin
        path: String,
    },
    /// Delete permanently (acknowledged, nothing is removed)
    Purge {
        path: String,
    },
    /// Show the live score
    Score,
    /// Finish the drill and report the evaluation
    Evaluate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show session progress
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Discard the session and start over
    Reset,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
}

/// Advanced explorer filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// File kind (pdf, xlsx, docx, png, jpg, txt)
    #[arg(long)]
    pub kind: Option<FileKind>,
    /// Only files larger than this many KB
    #[arg(long, conflicts_with = "smaller_than")]
    pub larger_than: Option<u64>,
    /// Only files smaller than this many KB
    #[arg(long)]
    pub smaller_than: Option<u64>,
    /// Only files modified within this many days
    #[arg(long)]
    pub since_days: Option<u32>,
}

impl FilterArgs {
    pub fn to_filters(&self, now: DateTime<Utc>) -> SearchFilters {
        let size = match (self.larger_than, self.smaller_than) {
            (Some(value_kb), _) => Some(SizeFilter {
                comparison: SizeComparison::Gt,
                value_kb,
            }),
            (None, Some(value_kb)) => Some(SizeFilter {
                comparison: SizeComparison::Lt,
                value_kb,
            }),
            (None, None) => None,
        };
        SearchFilters {
            kind: self.kind,
            size,
            date: self
                .since_days
                .and_then(|days| Duration::try_days(i64::from(days)))
                .and_then(|age| now.checked_sub_signed(age))
                .map(|since| DateFilter { since }),
        }
    }
}

/// CLI context for command execution
pub struct CliContext {
    config: FilehuntConfig,
    session: Mutex<Session>,
}

impl CliContext {
    /// Load configuration: an explicit file, or the layered sources for the workspace.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<FilehuntConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        Ok(config)
    }

    pub fn new(workspace_root: &Path, config: &FilehuntConfig) -> Result<Self, ApiError> {
        Ok(Self::with_session(
            Session::open(config, workspace_root)?,
            config.clone(),
        ))
    }

    pub fn with_session(session: Session, config: FilehuntConfig) -> Self {
        Self {
            config,
            session: Mutex::new(session),
        }
    }

    /// Execute a CLI command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let mut session = self.session.lock();
        let mut output = match command {
            Commands::Ls {
                path,
                query,
                filters,
                sort,
                desc,
            } => {
                let path = match path {
                    Some(raw) => parse_cli_path(raw)?,
                    None => vec![ROOT_NAME.to_string()],
                };
                let order = SortOrder {
                    key: *sort,
                    descending: *desc,
                };
                let query = query.as_deref().unwrap_or_default();
                match session.list(&path, query, &filters.to_filters(Utc::now()), order)? {
                    Some(nodes) => format_listing_text(&path, &nodes),
                    None => not_found(&path),
                }
            }
            Commands::Cd { path } => {
                let path = parse_cli_path(path)?;
                let outcome = session.navigate(&path)?;
                format_outcome_text(&format!("cd {}", display_path(&path)), &outcome)
            }
            Commands::Search { query } => {
                let hits = session.search(query);
                format_search_hits_text(query, &hits)
            }
            Commands::Find { query, filters } => {
                let hits = session.find(query, &filters.to_filters(Utc::now()))?;
                format_search_hits_text(query, &hits)
            }
            Commands::Open { path } => {
                let path = parse_cli_path(path)?;
                let outcome = session.open_file(&path)?;
                let mut out =
                    format_outcome_text(&format!("open {}", display_path(&path)), &outcome);
                if outcome.applied {
                    if let Some(result) = session.evaluation() {
                        out.push_str("\n\n");
                        out.push_str(&format_evaluation_text(result));
                    }
                }
                out
            }
            Commands::App { name, path } => {
                let path = path.as_deref().map(parse_cli_path).transpose()?;
                let outcome = session.open_app(*name, path)?;
                format_outcome_text(&format!("app {:?}", name), &outcome)
            }
            Commands::Mkdir { parent, name } => {
                let parent = parse_cli_path(parent)?;
                let outcome = session.create_folder(&parent, name)?;
                format_outcome_text(&format!("mkdir {}", name), &outcome)
            }
            Commands::Rename { path, name } => {
                let path = parse_cli_path(path)?;
                let outcome = session.rename(&path, name)?;
                format_outcome_text(&format!("rename {} -> {}", display_path(&path), name), &outcome)
            }
            Commands::Rm { path } => {
                let path = parse_cli_path(path)?;
                let outcome = session.delete(&path)?;
                format_outcome_text(&format!("rm {}", display_path(&path)), &outcome)
            }
            Commands::Restore { path } => {
                let path = parse_cli_path(path)?;
                let outcome = session.restore(&path)?;
                format_outcome_text(&format!("restore {}", display_path(&path)), &outcome)
            }
            Commands::Purge { path } => {
                let path = parse_cli_path(path)?;
                let outcome = session.delete_permanently(&path)?;
                format_outcome_text(&format!("purge {}", display_path(&path)), &outcome)
            }
            Commands::Score => format!("Live score: {}", session.live_score()),
            Commands::Evaluate { format } => {
                let result = session.evaluate()?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&result)
                        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?,
                    "text" => format_evaluation_text(&result),
                    other => return Err(invalid_format(other)),
                }
            }
            Commands::Status { format } => match format.as_str() {
                "json" => {
                    let out = json!({
                        "started_at": session.started_at(),
                        "live_score": session.live_score(),
                        "entries": session.log().len(),
                        "hint_shown": session.hint_shown(),
                        "evaluation": session.evaluation(),
                    });
                    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
                }
                "text" => format_status_text(&session),
                other => return Err(invalid_format(other)),
            },
            Commands::Reset => {
                session.reset()?;
                "Session reset.".to_string()
            }
            Commands::Config {
                command: ConfigCommands::Show,
            } => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))?,
        };

        if records_action(command) {
            if let Some(hint) = session.take_hint()? {
                output.push_str("\n\n");
                output.push_str(&format_hint_text(hint, session.constants()));
            }
        }
        info!(command = command_name(command), "Command finished");
        Ok(output)
    }
}

/// Commands that append to the action log
fn records_action(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Ls { .. }
            | Commands::Cd { .. }
            | Commands::Find { .. }
            | Commands::Open { .. }
            | Commands::App { .. }
    )
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Ls { .. } => "ls",
        Commands::Cd { .. } => "cd",
        Commands::Search { .. } => "search",
        Commands::Find { .. } => "find",
        Commands::Open { .. } => "open",
        Commands::App { .. } => "app",
        Commands::Mkdir { .. } => "mkdir",
        Commands::Rename { .. } => "rename",
        Commands::Rm { .. } => "rm",
        Commands::Restore { .. } => "restore",
        Commands::Purge { .. } => "purge",
        Commands::Score => "score",
        Commands::Evaluate { .. } => "evaluate",
        Commands::Status { .. } => "status",
        Commands::Reset => "reset",
        Commands::Config { .. } => "config",
    }
}

/// Parse a `/`-separated path argument.
pub fn parse_cli_path(raw: &str) -> Result<NodePath, ApiError> {
    let path = parse_path(raw);
    if path.is_empty() {
        return Err(ApiError::InvalidArgument(format!("empty path: {:?}", raw)));
    }
    Ok(path)
}

fn not_found(path: &[String]) -> String {
    format_outcome_text(
        &format!("ls {}", display_path(path)),
        &GestureOutcome::refused(crate::error::NoOpReason::NotFound),
    )
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidArgument(format!(
        "Invalid format: {} (must be 'text' or 'json')",
        format
    ))
}
