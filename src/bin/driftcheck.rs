//! Driftcheck CLI Binary
//!
//! Command-line interface for the driftcheck file integrity checker.

use clap::Parser;
use driftcheck::logging::init_logging;
use driftcheck::tooling::cli::{Cli, CliContext, EXIT_FAILURE};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx.with_color(cli.use_color()),
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(EXIT_FAILURE);
        }
    };

    let logging = match cli.logging_config(&context.config().logging) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Error resolving log file: {}", e);
            process::exit(EXIT_FAILURE);
        }
    };
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text);
            process::exit(output.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}
