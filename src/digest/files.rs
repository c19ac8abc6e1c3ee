//! File digester: turns files, directories and symlinks into a flat digest map

use crate::digest::hasher::sha256_reader;
use crate::digest::DigestOptions;
use crate::error::DigestError;
use crate::types::{DigestMap, DigestValue};
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Digest a list of files and directories with default options.
///
/// See [`digest_files_with`].
pub fn digest_files<P: AsRef<Path>>(paths: &[P]) -> Result<DigestMap, DigestError> {
    digest_files_with(paths, &DigestOptions::default())
}

/// Digest a list of files and directories.
///
/// Directories are expanded recursively and contribute no key of their own.
/// Symlinks are recorded by target and never followed, including when a root
/// path is itself a symlink. Every regular file is hashed by content.
pub fn digest_files_with<P: AsRef<Path>>(
    paths: &[P],
    options: &DigestOptions,
) -> Result<DigestMap, DigestError> {
    let roots: BTreeSet<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();

    let mut digests = DigestMap::new();
    for root in &roots {
        digest_tree(root, options, &mut digests)?;
    }
    Ok(digests)
}

fn digest_tree(
    root: &Path,
    options: &DigestOptions,
    digests: &mut DigestMap,
) -> Result<(), DigestError> {
    let walker = WalkDir::new(root).follow_links(false).follow_root_links(false);

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            DigestError::io(path, io::Error::from(e))
        })?;

        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            let target = std::fs::read_link(path).map_err(|e| DigestError::io(path, e))?;
            digests.insert_leaf(
                path.to_string_lossy(),
                DigestValue::Symlink(target.to_string_lossy().into_owned()),
            );
        } else if file_type.is_dir() {
            continue;
        } else if file_type.is_file() {
            digests.insert_leaf(path.to_string_lossy(), digest_file(path, options)?);
        } else {
            return Err(DigestError::io(
                path,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "not a regular file, directory or symlink",
                ),
            ));
        }
    }

    Ok(())
}

/// Digest a single regular file by content
pub fn digest_file(path: &Path, options: &DigestOptions) -> Result<DigestValue, DigestError> {
    let file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    sha256_reader(file, options.buffer_size).map_err(|e| DigestError::io(path, e))
}
