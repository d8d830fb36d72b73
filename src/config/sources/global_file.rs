//! Global config file source: `$XDG_CONFIG_HOME/filehunt/config.toml`

use crate::config::ConfigLoader;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match ConfigLoader::global_config_path() {
        Some(path) => Ok(builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )),
        None => Ok(builder),
    }
}
