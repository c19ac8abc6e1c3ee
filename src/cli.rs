//! CLI domain: parse, route, output, and presentation only.
//! No digesting logic; a single route table dispatches to the tester.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, CommandOutput, EXIT_DIFFERENCES, EXIT_ERROR, EXIT_REPRODUCIBLE};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_digests_json, format_digests_text, format_report_json, format_report_text,
};
pub use route::{command_name, RunContext};
