//! XDG Base Directory utilities for session data.

use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg_data_home));
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get the data directory for a specific workspace
///
/// Returns `$XDG_DATA_HOME/filehunt/<workspace_path>/`, so each workspace
/// directory keeps its own drill session.
pub fn workspace_data_dir(workspace_root: &Path) -> Result<PathBuf, ApiError> {
    let data_home = data_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;

    let canonical = workspace_root.canonicalize().map_err(|e| {
        ApiError::ConfigError(format!("Failed to canonicalize workspace path: {}", e))
    })?;

    let data_dir = canonical
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(name) => Some(name),
            _ => None,
        })
        .fold(data_home.join("filehunt"), |dir, name| dir.join(name));

    Ok(data_dir)
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config_home));
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}
