//! Program invocation as a repeatable operation

use crate::error::OperationFailure;
use crate::tester::Operation;
use std::ffi::OsString;
use std::process::Command;
use tracing::{debug, info, warn};

/// Runs an external program; success is a zero exit status
#[derive(Debug, Clone)]
pub struct CommandOperation {
    program: OsString,
    args: Vec<OsString>,
    invocations: u32,
}

impl CommandOperation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            invocations: 0,
        }
    }

    /// Number of times the program has been launched
    pub fn invocations(&self) -> u32 {
        self.invocations
    }

    fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Operation for CommandOperation {
    fn invoke(&mut self) -> Result<(), OperationFailure> {
        self.invocations += 1;
        let command_line = self.display();
        info!(command = %command_line, invocation = self.invocations, "Running command");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| {
                warn!(command = %command_line, error = %e, "Failed to launch command");
                OperationFailure::new(format!("failed to launch `{}`: {}", command_line, e))
            })?;

        if status.success() {
            debug!(command = %command_line, "Command succeeded");
            Ok(())
        } else {
            warn!(command = %command_line, %status, "Command failed");
            Err(OperationFailure::new(format!("`{}` exited with {}", command_line, status)))
        }
    }
}
