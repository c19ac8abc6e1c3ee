//! Presentation: verdict and digest formatting for text and JSON output.

use crate::error::ReproError;
use crate::tester::ReproducibilityReport;
use crate::types::DigestMap;
use chrono::{SecondsFormat, Utc};
use owo_colors::OwoColorize;
use serde_json::json;

const REPRODUCIBLE_HEADLINE: &str = "The command is reproducible!";
const IRREPRODUCIBLE_HEADLINE: &str =
    "The command is not reproducible: the following files are produced differently";

/// Human-readable verdict
pub fn format_report_text(report: &ReproducibilityReport, color: bool) -> String {
    if report.is_reproducible() {
        return if color {
            REPRODUCIBLE_HEADLINE.green().bold().to_string()
        } else {
            REPRODUCIBLE_HEADLINE.to_string()
        };
    }

    let headline = if color {
        IRREPRODUCIBLE_HEADLINE.red().bold().to_string()
    } else {
        IRREPRODUCIBLE_HEADLINE.to_string()
    };
    let mut lines = vec![headline, "by the second invocation:".to_string()];
    lines.extend(report.differences.iter().map(|key| format!("    {}", key)));
    lines.join("\n")
}

/// Machine-readable verdict
pub fn format_report_json(
    report: &ReproducibilityReport,
    command: &[String],
) -> Result<String, ReproError> {
    let out = json!({
        "reproducible": report.is_reproducible(),
        "command": command,
        "differences": report.differences,
        "first_snapshot_keys": report.first_snapshot_keys,
        "second_snapshot_keys": report.second_snapshot_keys,
        "checked_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// One `<key> <value>` line per digest, in key order
pub fn format_digests_text(digests: &DigestMap) -> String {
    if digests.is_empty() {
        return "No outputs to digest.".to_string();
    }
    digests
        .iter()
        .map(|(key, value)| format!("{} {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_digests_json(digests: &DigestMap) -> Result<String, ReproError> {
    Ok(serde_json::to_string_pretty(digests)?)
}
