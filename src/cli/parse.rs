//! CLI parse: clap types for reprocheck. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// reprocheck - check that a command produces identical outputs when run twice
#[derive(Parser)]
#[command(name = "reprocheck", version)]
#[command(about = "Test reproducibility by running a command twice and comparing its outputs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides reprocheck.toml and the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Test reproducibility by running a command twice
    Test {
        /// File or directory produced by the command
        #[arg(short = 'f', long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Archive produced by the command (all the files in the archive are
        /// compared separately, in addition to a comparison for the archive itself)
        #[arg(short = 'a', long = "archive", alias = "ar", value_name = "PATH")]
        archives: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// The command to run, followed by its arguments
        #[arg(
            value_name = "COMMAND",
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<OsString>,
    },
    /// Print the digests of a set of outputs without running anything
    Digest {
        /// File or directory to digest
        #[arg(short = 'f', long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Archive to digest entry by entry, in addition to as a whole file
        #[arg(short = 'a', long = "archive", alias = "ar", value_name = "PATH")]
        archives: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
