//! Config sources: an explicit TOML file and `TETHER_`-prefixed environment variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Add a required TOML file source.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    debug!(config_path = %path.display(), "Loading configuration file");
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    Ok(builder.add_source(File::from_str(&contents, FileFormat::Toml)))
}

/// Add environment overrides, e.g. `TETHER_LOGGING__LEVEL=debug` or `TETHER_DEMO__WORKERS=16`.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TETHER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
