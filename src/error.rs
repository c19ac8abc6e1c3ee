//! Error types for the reproducibility checker.

use std::path::PathBuf;
use thiserror::Error;

/// Digesting errors (file digester, archive digester, snapshot assembly)
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("{0} has an unsupported archive format")]
    UnsupportedFormat(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Digest key collision on {key}")]
    KeyCollision { key: String },
}

impl DigestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DigestError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The operation under test failed on one of its invocations
#[derive(Debug, Error)]
#[error("Operation failed on invocation {round}: {reason}")]
pub struct OperationFailure {
    /// 1 for the first invocation, 2 for the second
    pub round: u8,
    pub reason: String,
}

impl OperationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            round: 0,
            reason: reason.into(),
        }
    }

    /// Attach the invocation number the failure happened on
    pub fn in_round(mut self, round: u8) -> Self {
        self.round = round;
        self
    }
}

/// Top-level errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum ReproError {
    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error(transparent)]
    Operation(#[from] OperationFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ReproError {
    fn from(err: config::ConfigError) -> Self {
        ReproError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ReproError {
    fn from(err: serde_json::Error) -> Self {
        ReproError::Output(err.to_string())
    }
}
