use morsel_client::ClientError;
use serde_json::Value;

/// Per-row detail lines shown under a parse error, at most this many.
const MAX_ISSUE_LINES: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = issue_lines(error.data.as_ref());
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Rows that need attention:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn issue_lines(data: Option<&Value>) -> Vec<String> {
    let Some(issues) = data
        .and_then(|value| value.get("issues"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut lines = issues
        .iter()
        .take(MAX_ISSUE_LINES)
        .map(|issue| {
            let text = |key: &str| issue.get(key).and_then(Value::as_str).unwrap_or("");
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            format!(
                "  {} row {}: {} = \"{}\" (expected {})",
                text("file"),
                row,
                text("field"),
                text("value"),
                text("expected")
            )
        })
        .collect::<Vec<String>>();

    let total = data
        .and_then(|value| value.get("total_issues"))
        .and_then(Value::as_u64)
        .unwrap_or(issues.len() as u64) as usize;
    if total > lines.len() {
        lines.push(format!("  ... and {} more", total - lines.len()));
    }
    lines
}
