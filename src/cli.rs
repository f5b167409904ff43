//! CLI domain: parse, route and the demo scenarios the commands run.

mod parse;
mod route;
pub mod scenarios;

pub use parse::{Cli, Commands};
pub use route::RunContext;
