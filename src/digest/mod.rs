//! Content addressing for build outputs
//!
//! Files and directories are flattened into one digest per leaf; archives are
//! additionally decomposed into per-entry digests.

pub mod archive;
pub mod files;
pub mod hasher;

pub use archive::{digest_archive, digest_archive_with, is_supported_archive};
pub use files::{digest_files, digest_files_with};

use serde::{Deserialize, Serialize};

/// Digesting options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestOptions {
    /// Read chunk size in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    hasher::DEFAULT_BUFFER_SIZE
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

impl DigestOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_size == 0 {
            return Err("buffer_size must be greater than zero".to_string());
        }
        Ok(())
    }
}
