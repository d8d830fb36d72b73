//! Defaults seeded into every builder before any file or env source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub(super) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("storage.backend", "sled")?
        .set_default("report.sink", "stdout")?
        .set_default("report.target_origin", "*")
}
