//! Environment variable source: `FILEHUNT__SECTION__KEY`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

pub const ENV_PREFIX: &str = "FILEHUNT";
pub const ENV_SEPARATOR: &str = "__";

/// Nested keys use `__`, e.g. `FILEHUNT__STORAGE__BACKEND=memory`.
///
/// The prefix is followed by `__` as well, so the logging variables
/// (`FILEHUNT_LOG`, `FILEHUNT_LOG_FORMAT`, ...) read by the logger are not
/// picked up as config keys.
pub fn environment_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment_source()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilehuntConfig, StorageBackend};
    use config::Config;

    #[test]
    fn test_nested_keys_apply_and_log_vars_are_ignored() {
        let mut vars = config::Map::new();
        vars.insert("FILEHUNT__STORAGE__BACKEND".to_string(), "memory".to_string());
        vars.insert("FILEHUNT__SCENARIO__RNG_SEED".to_string(), "7".to_string());
        vars.insert("FILEHUNT_LOG".to_string(), "trace".to_string());

        let config: FilehuntConfig = Config::builder()
            .add_source(environment_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.scenario.rng_seed, 7);
        assert_eq!(config.logging.level, "info");
    }
}
