//! End-to-end reproducibility scenarios

use reprocheck::digest::archive::{date_time_key, entry_key, namelist_key};
use reprocheck::{test_reproducibility, DigestError, OperationFailure, ReproError};
use std::fs;
use tempfile::TempDir;
use zip::DateTime;

use crate::integration::test_utils::{key, write_zip, write_zip_at};

fn io_failure(e: std::io::Error) -> OperationFailure {
    OperationFailure::new(e.to_string())
}

#[test]
fn test_same_content_is_reproducible() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let op = || fs::write(&out, "A").map_err(io_failure);
    let differences = test_reproducibility(op, &[out.clone()], &[]).unwrap();
    assert!(differences.is_empty());
}

#[test]
fn test_changed_content_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let mut contents = ["A", "B"].into_iter();
    let op = || fs::write(&out, contents.next().unwrap()).map_err(io_failure);
    let differences = test_reproducibility(op, &[out.clone()], &[]).unwrap();
    assert_eq!(differences, vec![key(&out)]);
}

#[test]
fn test_archive_timestamp_difference() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.zip");

    let mut times = [
        DateTime::from_date_and_time(2020, 1, 1, 0, 0, 0).unwrap(),
        DateTime::from_date_and_time(2020, 1, 1, 0, 0, 2).unwrap(),
    ]
    .into_iter();
    let op = || -> Result<(), OperationFailure> {
        write_zip_at(&archive, &[("x", b"1")], times.next().unwrap());
        Ok(())
    };

    let differences = test_reproducibility(op, &[], &[archive.clone()]).unwrap();
    let name = key(&archive);
    assert_eq!(differences, vec![name.clone(), date_time_key(&name, "x")]);
    assert!(!differences.contains(&entry_key(&name, "x")));
    assert!(!differences.contains(&namelist_key(&name)));
}

#[test]
fn test_archive_listed_as_file_and_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.jar");

    let op = || -> Result<(), OperationFailure> {
        write_zip(&archive, &[("x", b"1")]);
        Ok(())
    };
    let differences =
        test_reproducibility(op, &[archive.clone()], &[archive.clone()]).unwrap();
    assert!(differences.is_empty());
}

#[test]
fn test_archive_declared_twice() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.zip");

    let op = || -> Result<(), OperationFailure> {
        write_zip(&archive, &[("x", b"1"), ("y", b"2")]);
        Ok(())
    };
    let differences =
        test_reproducibility(op, &[], &[archive.clone(), archive.clone()]).unwrap();
    assert!(differences.is_empty());
}

#[test]
fn test_entry_content_difference() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    let archive = out_dir.join("bundle.zip");

    let mut runs = 0;
    let op = || -> Result<(), OperationFailure> {
        runs += 1;
        let y: &[u8] = if runs == 1 { b"first" } else { b"second" };
        write_zip(&archive, &[("x", b"1"), ("y", y)]);
        Ok(())
    };

    let differences = test_reproducibility(op, &[out_dir.clone()], &[archive.clone()]).unwrap();
    let name = key(&archive);
    assert_eq!(differences, vec![name.clone(), entry_key(&name, "y")]);
}

#[test]
fn test_second_run_failure_yields_no_result() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let mut runs = 0;
    let op = || {
        runs += 1;
        if runs == 2 {
            return Err(OperationFailure::new("exit status: 1"));
        }
        fs::write(&out, "A").map_err(io_failure)
    };

    let result = test_reproducibility(op, &[out.clone()], &[]);
    assert!(matches!(result, Err(ReproError::Operation(ref f)) if f.round == 2));
}

#[test]
fn test_unsupported_archive_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.tgz");

    let op = || fs::write(&archive, "tarball").map_err(io_failure);
    let result = test_reproducibility(op, &[], &[archive.clone()]);
    assert!(matches!(
        result,
        Err(ReproError::Digest(DigestError::UnsupportedFormat(_)))
    ));
}

#[cfg(unix)]
#[test]
fn test_command_operation_exit_status() {
    use reprocheck::command::CommandOperation;

    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");
    let script = format!(
        "if [ -e '{0}' ]; then exit 1; fi; echo A > '{0}'",
        out.display()
    );

    let op = CommandOperation::new("sh", ["-c".to_string(), script]);
    let result = test_reproducibility(op, &[out.clone()], &[]);
    match result {
        Err(ReproError::Operation(failure)) => {
            assert_eq!(failure.round, 2);
            assert!(failure.reason.contains("exit"));
        }
        other => panic!("expected operation failure, got {other:?}"),
    }
}
