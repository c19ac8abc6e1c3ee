//! CLI output: error mapping and exit codes.

use crate::error::{DigestError, ReproError};

/// Exit code: every declared output was reproduced
pub const EXIT_REPRODUCIBLE: i32 = 0;
/// Exit code: at least one output differs between the two runs
pub const EXIT_DIFFERENCES: i32 = 1;
/// Exit code: the check could not be completed
pub const EXIT_ERROR: i32 = 2;

/// Result of a command: text for stdout and the process exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(text: String) -> Self {
        Self {
            text,
            exit_code: EXIT_REPRODUCIBLE,
        }
    }

    pub fn differences(text: String) -> Self {
        Self {
            text,
            exit_code: EXIT_DIFFERENCES,
        }
    }
}

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ReproError) -> String {
    match e {
        ReproError::Digest(DigestError::Io { path, source }) => {
            format!("Cannot read {}: {}", path.display(), source)
        }
        other => other.to_string(),
    }
}
