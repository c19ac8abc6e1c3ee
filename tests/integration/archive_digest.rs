//! Integration tests for the archive digester

use reprocheck::digest::archive::{date_time_key, entry_key, namelist_key};
use reprocheck::{compare_digests, digest_archive, DigestError};
use std::path::Path;
use tempfile::TempDir;
use zip::DateTime;

use crate::integration::test_utils::{key, write_zip, write_zip_at};

#[test]
fn test_archive_key_count() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("lib.jar");
    write_zip(
        &archive,
        &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n"),
            ("a/B.class", b"\xca\xfe"),
            ("c.txt", b""),
        ],
    );

    let digests = digest_archive(&archive).unwrap();
    assert_eq!(digests.len(), 1 + 2 * 3);
}

#[test]
fn test_renamed_entry() {
    let temp_dir = TempDir::new().unwrap();
    let before = temp_dir.path().join("before").join("a.zip");
    let after = temp_dir.path().join("after").join("a.zip");
    std::fs::create_dir_all(before.parent().unwrap()).unwrap();
    std::fs::create_dir_all(after.parent().unwrap()).unwrap();
    write_zip(&before, &[("x", b"1"), ("y", b"2")]);
    write_zip(&after, &[("x", b"1"), ("z", b"2")]);

    // Rebase both maps onto a common archive name so keys line up
    let rebase = |path: &Path| {
        let prefix = key(path);
        digest_archive(path)
            .unwrap()
            .into_iter()
            .map(|(k, v)| (k.replacen(&prefix, "a.zip", 1), v))
            .collect::<reprocheck::DigestMap>()
    };
    let differences = compare_digests(&rebase(before.as_path()), &rebase(after.as_path()));

    assert_eq!(
        differences,
        vec![
            namelist_key("a.zip"),
            entry_key("a.zip", "y"),
            date_time_key("a.zip", "y"),
            entry_key("a.zip", "z"),
            date_time_key("a.zip", "z"),
        ]
    );
    assert!(!differences.contains(&entry_key("a.zip", "x")));
}

#[test]
fn test_reordered_entries_change_only_namelist() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.zip");

    write_zip(&archive, &[("x", b"1"), ("y", b"2")]);
    let first = digest_archive(&archive).unwrap();
    write_zip(&archive, &[("y", b"2"), ("x", b"1")]);
    let second = digest_archive(&archive).unwrap();

    assert_eq!(compare_digests(&first, &second), vec![namelist_key(&key(&archive))]);
}

#[test]
fn test_timestamp_change_isolated_to_date_time_key() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.war");

    let first_time = DateTime::from_date_and_time(2020, 1, 1, 0, 0, 0).unwrap();
    let second_time = DateTime::from_date_and_time(2021, 6, 1, 12, 30, 0).unwrap();

    write_zip_at(&archive, &[("x", b"1")], first_time);
    let first = digest_archive(&archive).unwrap();
    write_zip_at(&archive, &[("x", b"1")], second_time);
    let second = digest_archive(&archive).unwrap();

    assert_eq!(
        compare_digests(&first, &second),
        vec![date_time_key(&key(&archive), "x")]
    );
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.tar");
    std::fs::write(&archive, b"whatever").unwrap();

    let err = digest_archive(&archive).unwrap_err();
    assert!(matches!(err, DigestError::UnsupportedFormat(ref p) if p == &archive));
    assert!(err.to_string().contains("unsupported archive format"));
}
