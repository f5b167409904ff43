//! CLI route: single route table and run context. Dispatches to the demo scenarios.

use crate::cli::parse::Commands;
use crate::cli::scenarios::{fanout, nested_parallel, value_threading};
use crate::config::{DemoConfig, TetherConfig};
use crate::error::ScenarioError;
use tracing::info;

/// Runtime context for CLI execution: the effective configuration.
pub struct RunContext {
    config: TetherConfig,
}

impl RunContext {
    pub fn new(config: TetherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TetherConfig {
        &self.config
    }

    /// Execute a command and return its printable output
    pub fn execute(&self, command: &Commands) -> Result<String, ScenarioError> {
        match command {
            Commands::Nested => {
                let report = self.runtime()?.block_on(nested_parallel())?;
                Ok(format!(
                    "overriding child: {}\ninheriting child: {}\nparent after:     {}",
                    show(report.overriding_child),
                    show(report.inheriting_child),
                    show(report.parent_after)
                ))
            }
            Commands::Threading => {
                let result = value_threading()?;
                Ok(format!("result: {}", result))
            }
            Commands::Fanout { workers, depth } => {
                let params = DemoConfig {
                    workers: workers.unwrap_or(self.config.demo.workers),
                    depth: depth.unwrap_or(self.config.demo.depth),
                };
                params
                    .validate()
                    .map_err(ScenarioError::InvalidParameters)?;
                info!(workers = params.workers, depth = params.depth, "Running fan-out");

                let report = self
                    .runtime()?
                    .block_on(fanout(params.workers, params.depth))?;
                let mut out = format!(
                    "workers: {}\ndepth: {}\nisolated: {}",
                    report.workers,
                    report.depth,
                    report.is_isolated()
                );
                for mismatch in &report.mismatches {
                    out.push_str("\n  - ");
                    out.push_str(mismatch);
                }
                Ok(out)
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ScenarioError::Render(format!("config as TOML: {}", e))),
        }
    }

    fn runtime(&self) -> Result<tokio::runtime::Runtime, ScenarioError> {
        Ok(tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?)
    }
}

fn show(value: Option<i32>) -> String {
    value.map_or_else(|| "<unset>".to_string(), |v| v.to_string())
}
