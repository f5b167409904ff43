//! Error types for scoped context propagation.

use thiserror::Error;

/// Errors raised by the context read/write operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Can't define context value `{context}` outside a dispatched scope")]
    NoActiveScope { context: String },

    #[error(
        "Can't use context value `{context}` outside a dispatched scope without a default value\n  \
         - Declare a default with `create_context_with_default`\n  \
         - Wrap the code that calls `use_context` with `dispatch`"
    )]
    NoActiveScopeNoDefault { context: String },
}

impl ContextError {
    /// Label of the context definition the failing call was made with
    pub fn context_label(&self) -> &str {
        match self {
            ContextError::NoActiveScope { context }
            | ContextError::NoActiveScopeNoDefault { context } => context,
        }
    }
}

/// Errors from the demo scenarios run by the CLI
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Scenario task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid scenario parameters: {0}")]
    InvalidParameters(String),

    #[error("Context {0} has no value in the current scope")]
    Unbound(String),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}
