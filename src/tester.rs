//! Reproducibility tester: run an operation twice and compare output snapshots

use crate::compare::compare_digests;
use crate::digest::{digest_archive_with, digest_files_with, DigestOptions};
use crate::error::{OperationFailure, ReproError};
use crate::types::{DigestKey, DigestMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A repeatable, side-effecting unit of work (typically a build step)
pub trait Operation {
    /// Run the operation to completion.
    fn invoke(&mut self) -> Result<(), OperationFailure>;
}

impl<F> Operation for F
where
    F: FnMut() -> Result<(), OperationFailure>,
{
    fn invoke(&mut self) -> Result<(), OperationFailure> {
        self()
    }
}

/// Declared outputs of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Files and directories produced by the operation
    pub files: Vec<PathBuf>,
    /// Archives among the outputs, compared entry by entry in addition to as whole files
    pub archives: Vec<PathBuf>,
}

impl OutputSpec {
    pub fn new(files: Vec<PathBuf>, archives: Vec<PathBuf>) -> Self {
        Self { files, archives }
    }

    /// Build one snapshot of the declared outputs.
    ///
    /// Archives are digested as whole files and, on top of that, entry by
    /// entry. Archive keys live in the `#`-suffixed namespace of their archive
    /// and are overlaid without replacing any file key. An archive declared
    /// more than once is overlaid once.
    pub fn snapshot(&self, options: &DigestOptions) -> Result<DigestMap, ReproError> {
        let all_paths: Vec<&PathBuf> = self.files.iter().chain(self.archives.iter()).collect();
        let mut snapshot = digest_files_with(&all_paths, options)?;

        let archives: BTreeSet<&PathBuf> = self.archives.iter().collect();
        for archive in archives {
            snapshot.overlay(digest_archive_with(archive, options)?)?;
        }

        Ok(snapshot)
    }
}

/// Outcome of a two-run reproducibility test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproducibilityReport {
    /// Keys whose digests differ between the runs, sorted ascending
    pub differences: Vec<DigestKey>,
    /// Number of keys in the first snapshot
    pub first_snapshot_keys: usize,
    /// Number of keys in the second snapshot
    pub second_snapshot_keys: usize,
}

impl ReproducibilityReport {
    pub fn is_reproducible(&self) -> bool {
        self.differences.is_empty()
    }
}

/// Runs an operation twice and compares snapshots of its outputs
#[derive(Debug, Clone, Default)]
pub struct ReproducibilityTester {
    outputs: OutputSpec,
    options: DigestOptions,
}

impl ReproducibilityTester {
    pub fn new(outputs: OutputSpec) -> Self {
        Self {
            outputs,
            options: DigestOptions::default(),
        }
    }

    pub fn with_options(outputs: OutputSpec, options: DigestOptions) -> Self {
        Self { outputs, options }
    }

    pub fn outputs(&self) -> &OutputSpec {
        &self.outputs
    }

    /// Run `operation`, snapshot, run it again, snapshot, compare.
    ///
    /// The runs are strictly sequential. A failed invocation aborts the test
    /// before its snapshot is taken.
    pub fn run<O: Operation + ?Sized>(
        &self,
        operation: &mut O,
    ) -> Result<ReproducibilityReport, ReproError> {
        operation.invoke().map_err(|e| e.in_round(1))?;
        let first = self.outputs.snapshot(&self.options)?;

        operation.invoke().map_err(|e| e.in_round(2))?;
        let second = self.outputs.snapshot(&self.options)?;

        Ok(ReproducibilityReport {
            differences: compare_digests(&first, &second),
            first_snapshot_keys: first.len(),
            second_snapshot_keys: second.len(),
        })
    }
}

/// Test whether `operation` produces identical outputs on two invocations.
///
/// Returns the sorted keys of every differing artifact; an empty result means
/// every declared output, including each entry of declared archives, was
/// reproduced byte for byte.
pub fn test_reproducibility<O: Operation>(
    mut operation: O,
    output_files: &[PathBuf],
    output_archives: &[PathBuf],
) -> Result<Vec<DigestKey>, ReproError> {
    let outputs = OutputSpec::new(output_files.to_vec(), output_archives.to_vec());
    let report = ReproducibilityTester::new(outputs).run(&mut operation)?;
    Ok(report.differences)
}
