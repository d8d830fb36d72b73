//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::FilehuntConfig;
use config::ConfigError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Global config file path (`$XDG_CONFIG_HOME/filehunt/config.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        super::xdg::config_home()
            .ok()
            .map(|home| home.join("filehunt").join("config.toml"))
    }

    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<FilehuntConfig, ConfigError> {
        MergeService::load(workspace_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<FilehuntConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> FilehuntConfig {
        FilehuntConfig::default()
    }
}
