//! Reprocheck CLI Binary
//!
//! Command-line interface for the reproducibility checker.

use clap::Parser;
use reprocheck::cli::{map_error, Cli, RunContext, EXIT_ERROR};
use reprocheck::config::ConfigLoader;
use reprocheck::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_ERROR);
    }

    info!("Reprocheck CLI starting");

    let context = match RunContext::new(Path::new("."), cli.config.as_deref()) {
        Ok(ctx) => ctx.with_color(std::io::stdout().is_terminal()),
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_ERROR);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(exit_code = output.exit_code, "Command completed");
            println!("{}", output.text);
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_ERROR);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Logging stays off unless `--verbose` or `--log-level` is given.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig::off();
    }

    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(Path::new("."))
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
