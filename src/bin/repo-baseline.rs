//! repo-baseline CLI Binary
//!
//! Command-line interface for OSPS Baseline repository checks.

use clap::Parser;
use repo_baseline::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let context = match CliContext::new(&cli, working_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = context.init_logging() {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text);
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
