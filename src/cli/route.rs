//! CLI route: single route table and run context. Dispatches to the tester and presentation.

use crate::cli::output::CommandOutput;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_digests_json, format_digests_text, format_report_json, format_report_text,
};
use crate::command::CommandOperation;
use crate::config::{ConfigLoader, ReprocheckConfig};
use crate::error::ReproError;
use crate::tester::{OutputSpec, ReproducibilityTester};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and output preferences.
pub struct RunContext {
    config: ReprocheckConfig,
    color: bool,
}

/// Stable name of a command, for logs
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Test { .. } => "test",
        Commands::Digest { .. } => "digest",
    }
}

impl RunContext {
    /// Create run context from the working directory and optional config path.
    pub fn new(working_dir: &Path, config_path: Option<&Path>) -> Result<Self, ReproError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(working_dir)?,
        };
        Self::from_config(config)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(config: ReprocheckConfig) -> Result<Self, ReproError> {
        config.validate()?;
        Ok(Self {
            config,
            color: false,
        })
    }

    /// Colorize the verdict headline
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &ReprocheckConfig {
        &self.config
    }

    /// Execute a command. The match below is the whole route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ReproError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Test {
                files,
                archives,
                format,
                command,
            } => self.handle_test(files, archives, format, command),
            Commands::Digest {
                files,
                archives,
                format,
            } => self.handle_digest(files, archives, format),
        }
    }

    fn handle_test(
        &self,
        files: &[PathBuf],
        archives: &[PathBuf],
        format: &str,
        command: &[OsString],
    ) -> Result<CommandOutput, ReproError> {
        check_format(format)?;
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ReproError::Config("No command to run".to_string()))?;

        let outputs = OutputSpec::new(files.to_vec(), archives.to_vec());
        let tester = ReproducibilityTester::with_options(outputs, self.config.digest.clone());
        let mut operation = CommandOperation::new(program.clone(), args.iter().cloned());

        let report = tester.run(&mut operation)?;
        info!(
            differences = report.differences.len(),
            keys = report.second_snapshot_keys,
            "Reproducibility check finished"
        );

        let text = if format == "json" {
            let command_line: Vec<String> = command
                .iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect();
            format_report_json(&report, &command_line)?
        } else {
            format_report_text(&report, self.color)
        };

        if report.is_reproducible() {
            Ok(CommandOutput::success(text))
        } else {
            Ok(CommandOutput::differences(text))
        }
    }

    fn handle_digest(
        &self,
        files: &[PathBuf],
        archives: &[PathBuf],
        format: &str,
    ) -> Result<CommandOutput, ReproError> {
        check_format(format)?;
        let outputs = OutputSpec::new(files.to_vec(), archives.to_vec());
        let digests = outputs.snapshot(&self.config.digest)?;
        debug!(keys = digests.len(), "Snapshot taken");

        let text = if format == "json" {
            format_digests_json(&digests)?
        } else {
            format_digests_text(&digests)
        };
        Ok(CommandOutput::success(text))
    }
}

fn check_format(format: &str) -> Result<(), ReproError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ReproError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
