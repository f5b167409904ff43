//! Configuration System
//!
//! Settings for the `tether` binary: logging setup and the parameters of the demo
//! scenarios. Loaded from defaults, an optional TOML file and `TETHER_`-prefixed
//! environment variables, in increasing order of precedence.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge_policy;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TetherConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Demo scenario parameters
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Parameters for the demo scenarios run by the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of concurrently spawned flows in the fan-out scenario
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Nesting depth each fan-out flow descends to
    #[serde(default = "default_depth")]
    pub depth: usize,
}

fn default_workers() -> usize {
    8
}

fn default_depth() -> usize {
    4
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            depth: default_depth(),
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be at least 1".to_string());
        }
        if self.depth == 0 {
            return Err("depth must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Logging(String),
    Demo(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Demo(msg) => write!(f, "Demo: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TetherConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if let Err(e) = self.demo.validate() {
            errors.push(ValidationError::Demo(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`TetherConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, then `path` if given, then the environment, and validate the result
    pub fn load(path: Option<&Path>) -> Result<TetherConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = path {
            builder = sources::add_file(builder, path)?;
        }
        builder = sources::add_environment(builder);

        let config: TetherConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    /// Load a single TOML file over the defaults, ignoring the environment
    pub fn load_from_file(path: &Path) -> Result<TetherConfig, ConfigError> {
        let builder = sources::add_file(merge_policy::builder_with_defaults()?, path)?;
        let config: TetherConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    fn checked(config: TetherConfig) -> Result<TetherConfig, ConfigError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
