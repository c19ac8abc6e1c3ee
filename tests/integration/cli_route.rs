//! Integration tests for CLI routing: test and digest commands through RunContext

use reprocheck::cli::{Commands, RunContext, EXIT_DIFFERENCES, EXIT_REPRODUCIBLE};
use reprocheck::config::ReprocheckConfig;
use reprocheck::ReproError;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::test_utils::{key, write_zip};

fn context() -> RunContext {
    RunContext::from_config(ReprocheckConfig::default()).unwrap()
}

fn shell(script: String) -> Vec<OsString> {
    vec!["sh".into(), "-c".into(), script.into()]
}

#[cfg(unix)]
#[test]
fn test_reproducible_command_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let output = context()
        .execute(&Commands::Test {
            files: vec![out.clone()],
            archives: vec![],
            format: "text".to_string(),
            command: shell(format!("echo A > '{}'", out.display())),
        })
        .unwrap();

    assert_eq!(output.exit_code, EXIT_REPRODUCIBLE);
    assert_eq!(output.text, "The command is reproducible!");
}

#[cfg(unix)]
#[test]
fn test_irreproducible_command_lists_file() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");
    let counter = temp_dir.path().join("counter");

    let script = format!(
        "echo run >> '{counter}'; wc -l < '{counter}' > '{out}'",
        counter = counter.display(),
        out = out.display()
    );
    let output = context()
        .execute(&Commands::Test {
            files: vec![out.clone()],
            archives: vec![],
            format: "text".to_string(),
            command: shell(script),
        })
        .unwrap();

    assert_eq!(output.exit_code, EXIT_DIFFERENCES);
    assert!(output.text.starts_with("The command is not reproducible"));
    assert!(output.text.ends_with(&format!("    {}", key(&out))));
}

#[cfg(unix)]
#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let output = context()
        .execute(&Commands::Test {
            files: vec![out.clone()],
            archives: vec![],
            format: "json".to_string(),
            command: shell(format!("echo A > '{}'", out.display())),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["reproducible"], true);
    assert_eq!(value["command"][0], "sh");
    assert_eq!(value["first_snapshot_keys"], 1);
}

#[cfg(unix)]
#[test]
fn test_failing_command_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.txt");

    let err = context()
        .execute(&Commands::Test {
            files: vec![out],
            archives: vec![],
            format: "text".to_string(),
            command: vec!["false".into()],
        })
        .unwrap_err();
    assert!(matches!(err, ReproError::Operation(ref f) if f.round == 1));
}

#[test]
fn test_invalid_format_rejected_before_running() {
    let err = context()
        .execute(&Commands::Test {
            files: vec![],
            archives: vec![],
            format: "yaml".to_string(),
            command: vec!["/nonexistent/never-run".into()],
        })
        .unwrap_err();
    assert!(matches!(err, ReproError::Config(_)));
}

#[test]
fn test_digest_command_lists_archive_keys() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("a.zip");
    write_zip(&archive, &[("x", b"1")]);

    let output = context()
        .execute(&Commands::Digest {
            files: vec![],
            archives: vec![archive.clone()],
            format: "json".to_string(),
        })
        .unwrap();

    assert_eq!(output.exit_code, EXIT_REPRODUCIBLE);
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let name = key(&archive);
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.contains_key(&name));
    assert!(object.contains_key(&format!("{name}#namelist")));
    assert!(object.contains_key(&format!("{name}#x#date_time")));
    assert!(object[&format!("{name}#x")]
        .as_str()
        .unwrap()
        .starts_with("sha256="));
}

#[test]
fn test_context_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[digest]\nbuffer_size = 1024\n").unwrap();

    let ctx = RunContext::new(temp_dir.path(), Some(config_path.as_path())).unwrap();
    assert_eq!(ctx.config().digest.buffer_size, 1024);
}

#[test]
fn test_context_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("reprocheck.toml"),
        "[digest]\nbuffer_size = 0\n",
    )
    .unwrap();

    let result = RunContext::new(temp_dir.path(), None::<&std::path::Path>);
    assert!(matches!(result, Err(ReproError::Config(_))));
}

#[test]
fn test_digest_missing_path_is_error() {
    let err = context()
        .execute(&Commands::Digest {
            files: vec![PathBuf::from("/nonexistent/reprocheck/output")],
            archives: vec![],
            format: "text".to_string(),
        })
        .unwrap_err();
    let message = reprocheck::cli::map_error(&err);
    assert!(message.starts_with("Cannot read /nonexistent/reprocheck/output"));
}
