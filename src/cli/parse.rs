//! CLI parse: clap types for Tether. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tether CLI - run scoped context propagation scenarios
#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Run scoped context propagation scenarios")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parent scope with two concurrent child scopes, one overriding a value
    Nested,
    /// Multiply a defaulted value by one read from a nested scope
    Threading,
    /// Spawn concurrent flows that each bind and descend, then check isolation
    Fanout {
        /// Number of flows (overrides config)
        #[arg(long)]
        workers: Option<usize>,
        /// Nesting depth per flow (overrides config)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
}
