//! Filehunt CLI Binary
//!
//! Command-line interface for the file-finding drill.

use clap::Parser;
use filehunt::logging::init_logging;
use filehunt::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut config = match CliContext::load_config(&cli.workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    cli.apply_log_overrides(&mut config.logging);
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(&cli.workspace, &config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing session: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
