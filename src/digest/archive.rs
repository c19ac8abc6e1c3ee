//! Archive digester: entry-granular digests for zip-compatible containers
//!
//! An archive at `<path>` contributes one key for its ordered entry-name list
//! (`<path>#namelist`), and per entry one key for its stored timestamp
//! (`<path>#<entry>#date_time`) and one for its decompressed content
//! (`<path>#<entry>`).

use crate::digest::hasher::{sha256_json, sha256_reader};
use crate::digest::DigestOptions;
use crate::error::DigestError;
use crate::types::{DigestKey, DigestMap, ARCHIVE_KEY_SEPARATOR};
use std::fs::File;
use std::io;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Extensions parsed with the zip reader
pub const SUPPORTED_ARCHIVE_EXTENSIONS: &[&str] = &["zip", "jar", "war"];

/// Suffix of the entry-name list key
pub const NAMELIST_SUFFIX: &str = "namelist";

/// Suffix of an entry's timestamp key
pub const DATE_TIME_SUFFIX: &str = "date_time";

/// Whether `path` has a supported archive extension
pub fn is_supported_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_ARCHIVE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Key of the entry-name list digest
pub fn namelist_key(archive: &str) -> DigestKey {
    format!("{archive}{ARCHIVE_KEY_SEPARATOR}{NAMELIST_SUFFIX}")
}

/// Key of an entry's timestamp digest
pub fn date_time_key(archive: &str, entry: &str) -> DigestKey {
    format!("{archive}{ARCHIVE_KEY_SEPARATOR}{entry}{ARCHIVE_KEY_SEPARATOR}{DATE_TIME_SUFFIX}")
}

/// Key of an entry's content digest
pub fn entry_key(archive: &str, entry: &str) -> DigestKey {
    format!("{archive}{ARCHIVE_KEY_SEPARATOR}{entry}")
}

/// Digest an archive entry by entry with default options.
pub fn digest_archive(path: &Path) -> Result<DigestMap, DigestError> {
    digest_archive_with(path, &DigestOptions::default())
}

/// Digest an archive entry by entry.
///
/// Fails with [`DigestError::UnsupportedFormat`] before opening the file when
/// the extension is not supported. A corrupt archive is an I/O error of kind
/// `InvalidData`.
pub fn digest_archive_with(
    path: &Path,
    options: &DigestOptions,
) -> Result<DigestMap, DigestError> {
    if !is_supported_archive(path) {
        return Err(DigestError::UnsupportedFormat(path.to_path_buf()));
    }
    digest_zip_archive(path, options)
}

fn digest_zip_archive(path: &Path, options: &DigestOptions) -> Result<DigestMap, DigestError> {
    let archive_name = path.to_string_lossy();
    let to_error = |e: ZipError| DigestError::io(path, zip_error_to_io(e));

    let file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(to_error)?;

    let mut digests = DigestMap::new();
    let mut names = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(to_error)?;
        let name = entry.name().to_string();

        let date_time = entry.last_modified().map(|dt| {
            [
                dt.year(),
                u16::from(dt.month()),
                u16::from(dt.day()),
                u16::from(dt.hour()),
                u16::from(dt.minute()),
                u16::from(dt.second()),
            ]
        });
        let date_time_digest =
            sha256_json(&date_time).map_err(|e| DigestError::io(path, e.into()))?;
        digests.insert_leaf(date_time_key(&archive_name, &name), date_time_digest);

        let content_digest =
            sha256_reader(&mut entry, options.buffer_size).map_err(|e| DigestError::io(path, e))?;
        digests.insert_leaf(entry_key(&archive_name, &name), content_digest);

        names.push(name);
    }

    let namelist_digest = sha256_json(&names).map_err(|e| DigestError::io(path, e.into()))?;
    digests.insert_leaf(namelist_key(&archive_name), namelist_digest);

    Ok(digests)
}

fn zip_error_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
