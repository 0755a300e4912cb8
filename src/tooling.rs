//! Tooling
//!
//! Command-line entry points over the scanner and assessment steps.

pub mod cli;

pub use cli::{Cli, CliContext, CommandOutput, Commands};
