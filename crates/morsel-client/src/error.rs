use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const INGEST_HELP_COMMAND: &str = "morsel ingest --help";
pub(crate) const QUERY_HELP_COMMAND: &str = "morsel query --help";

/// Rows listed in a `parse_error` payload before the list is cut off.
const MAX_REPORTED_ISSUES: usize = 50;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

/// One unparseable cell, with enough context to find it in the source file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParseIssue {
    pub file: String,
    pub row: i64,
    pub field: String,
    pub value: String,
    pub expected: String,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_") || self.code == "artifact_write_failed"
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `morsel {cmd} --help` for usage."),
            None => "Run `morsel --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_request(message: &str) -> Self {
        Self::new(
            "invalid_request",
            message,
            vec![
                "Use metric `quantity`, `price`, or `sales`.".to_string(),
                "Pass dates as YYYY-MM-DD.".to_string(),
                format!("Run `{QUERY_HELP_COMMAND}` for the full request shape."),
            ],
        )
    }

    pub fn invalid_setting(variable: &str, value: &str, expected: &str) -> Self {
        Self::new(
            "invalid_request",
            &format!("`{variable}` is set to \"{value}\", expected {expected}."),
            vec![format!("Unset `{variable}` or give it {expected}.")],
        )
        .with_data(json!({
            "variable": variable,
            "value": value,
        }))
    }

    pub fn schema_mismatch(path: &Path, required: &[&str], actual: Vec<String>) -> Self {
        let location = path.display().to_string();
        let missing = required
            .iter()
            .filter(|name| !actual.iter().any(|header| header == *name))
            .map(|name| name.to_string())
            .collect::<Vec<String>>();

        Self::new(
            "schema_error",
            &format!(
                "`{location}` is missing required columns: {}.",
                missing.join(", ")
            ),
            vec![
                format!("Add a header row containing: {}.", required.join(", ")),
                format!("Run `{INGEST_HELP_COMMAND}` to review the expected layout."),
            ],
        )
        .with_data(json!({
            "file": location,
            "required_columns": required,
            "missing_columns": missing,
            "actual_columns": actual,
        }))
    }

    pub fn malformed_csv(path: &Path, row: i64, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "parse_error",
            &format!("`{location}` row {row} is not valid CSV: {detail}"),
            vec![
                "Make every row carry the same number of fields as the header.".to_string(),
                "Save the file as UTF-8.".to_string(),
            ],
        )
        .with_data(json!({
            "file": location,
            "row": row,
        }))
    }

    pub fn parse_failed(issues: Vec<ParseIssue>) -> Self {
        let total = issues.len();
        let message = match issues.first() {
            Some(first) => format!(
                "{total} values could not be parsed; first at `{}` row {} ({} = \"{}\"). Nothing was written.",
                first.file, first.row, first.field, first.value
            ),
            None => "Values could not be parsed. Nothing was written.".to_string(),
        };
        let reported = issues
            .into_iter()
            .take(MAX_REPORTED_ISSUES)
            .collect::<Vec<ParseIssue>>();

        Self::new(
            "parse_error",
            &message,
            vec![
                "Fix the listed values in the source files.".to_string(),
                "Rerun `morsel ingest`.".to_string(),
            ],
        )
        .with_data(json!({
            "total_issues": total,
            "truncated": total > reported.len(),
            "issues": reported,
        }))
    }

    pub fn no_source_files(dir: &Path) -> Self {
        let location = dir.display().to_string();
        Self::new(
            "source_not_found",
            &format!("No `*.csv` source files were found in `{location}`."),
            vec![
                format!("Place the daily sales CSV files in `{location}`."),
                "Or point `--data-dir` / `MORSEL_DATA_DIR` at the right directory.".to_string(),
            ],
        )
        .with_data(json!({
            "data_dir": location,
        }))
    }

    pub fn source_not_found(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_not_found",
            &format!("Could not read `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Run `morsel ingest` first if the derived dataset has not been built.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn artifact_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "artifact_write_failed",
            &format!("Could not write `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `MORSEL_OUTPUT_DIR` to a writable directory."
            )],
        )
    }

    pub fn listener_failed(address: &str, detail: &str) -> Self {
        Self::new(
            "internal_listener_error",
            &format!("Could not serve on `{address}`: {detail}"),
            vec![
                "Check that nothing else is listening on that address.".to_string(),
                "Pick another port with `--port` or `MORSEL_PORT`.".to_string(),
            ],
        )
        .with_data(json!({
            "address": address,
        }))
    }

    pub fn total_overflow(metric: &str, date: &str) -> Self {
        Self::new(
            "internal_overflow_error",
            &format!("The {metric} total for {date} is too large to represent."),
            vec![
                "Narrow the request to one region.".to_string(),
                "Check the source files for implausibly large quantities or prices.".to_string(),
            ],
        )
        .with_data(json!({
            "metric": metric,
            "date": date,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
