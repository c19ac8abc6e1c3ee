//! Reprocheck: byte-for-byte reproducibility checking
//!
//! Runs an operation twice, snapshots its declared outputs after each run and
//! reports every artifact whose digest changed. Archives are decomposed so a
//! difference can be pinned to one entry's content or timestamp.

pub mod cli;
pub mod command;
pub mod compare;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod tester;
pub mod types;

pub use compare::compare_digests;
pub use digest::{digest_archive, digest_files};
pub use error::{DigestError, OperationFailure, ReproError};
pub use tester::{
    test_reproducibility, Operation, OutputSpec, ReproducibilityReport, ReproducibilityTester,
};
pub use types::{DigestKey, DigestMap, DigestValue};
