//! Tether CLI Binary
//!
//! Runs the scoped context propagation scenarios from the command line.

use anyhow::Context as _;
use clap::Parser;
use tether::cli::{Cli, RunContext};
use tether::config::ConfigLoader;
use tether::logging::init_logging;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.logging.format = format.clone();
    }

    init_logging(Some(&config.logging)).context("initializing logging")?;
    info!("Tether CLI starting");

    let run = RunContext::new(config);
    match run.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e.into())
        }
    }
}
