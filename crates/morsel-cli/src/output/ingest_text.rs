use std::io;

use serde_json::Value;

use super::format::{Align, Column, count_field, date_span, key_value_rows, render_table, text_field};

pub fn render_ingest(data: &Value) -> io::Result<String> {
    let dataset_path = data
        .get("dataset_path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("ingest output requires dataset_path"))?;

    let files = data
        .get("files")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let artifacts = data
        .get("artifacts")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = vec![format!(
        "Ingested {} rows from {} files into {dataset_path}",
        count_field(data, "rows_matched"),
        files.len()
    )];
    lines.push(String::new());
    lines.extend(key_value_rows(
        &[
            ("Product", text_field(data, "product").to_string()),
            ("Data directory", text_field(data, "data_dir").to_string()),
            ("Rows read", count_field(data, "rows_read").to_string()),
            ("Rows kept", count_field(data, "rows_matched").to_string()),
            ("Dates", date_span(data.get("data_range"))),
        ],
        2,
    ));

    if !files.is_empty() {
        lines.push(String::new());
        lines.push("Source files:".to_string());
        lines.extend(render_table(
            &[
                Column {
                    name: "File",
                    align: Align::Left,
                },
                Column {
                    name: "Rows",
                    align: Align::Right,
                },
            ],
            &files
                .iter()
                .map(|file| {
                    vec![
                        text_field(file, "path").to_string(),
                        count_field(file, "rows").to_string(),
                    ]
                })
                .collect::<Vec<Vec<String>>>(),
        ));
    }

    lines.push(String::new());
    lines.push("Artifacts written:".to_string());
    lines.extend(render_table(
        &[
            Column {
                name: "Stage",
                align: Align::Left,
            },
            Column {
                name: "Rows",
                align: Align::Right,
            },
            Column {
                name: "Path",
                align: Align::Left,
            },
        ],
        &artifacts
            .iter()
            .map(|artifact| {
                vec![
                    text_field(artifact, "kind").to_string(),
                    count_field(artifact, "rows").to_string(),
                    text_field(artifact, "path").to_string(),
                ]
            })
            .collect::<Vec<Vec<String>>>(),
    ));

    if count_field(data, "rows_matched") == 0 {
        lines.push(String::new());
        lines.push(format!(
            "No rows matched product \"{}\". Product names are matched exactly, including case.",
            text_field(data, "product")
        ));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    lines.push("  1. Run `morsel query` to chart quantity sold per day.".to_string());
    lines.push("  2. Run `morsel serve` to answer chart requests over HTTP.".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_ingest;

    fn summary(rows_matched: i64) -> serde_json::Value {
        json!({
            "product": "pink morsel",
            "data_dir": "data",
            "files": [
                { "path": "data/daily_sales_data_0.csv", "rows": 3 },
                { "path": "data/daily_sales_data_1.csv", "rows": 3 }
            ],
            "rows_read": 6,
            "rows_matched": rows_matched,
            "data_range": { "earliest": "2018-02-05", "latest": "2018-02-06" },
            "artifacts": [
                { "kind": "sales", "path": "sales.csv", "rows": rows_matched }
            ],
            "dataset_path": "sales.csv"
        })
    }

    #[test]
    fn renders_counts_files_and_artifacts() {
        let rendered = render_ingest(&summary(4));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Ingested 4 rows from 2 files into sales.csv"));
            assert!(text.contains("  Rows read       6"));
            assert!(text.contains("  Dates           2018-02-05 to 2018-02-06"));
            assert!(text.contains("Source files:"));
            assert!(text.contains("  sales     4  sales.csv"));
            assert!(!text.contains("No rows matched"));
        }
    }

    #[test]
    fn warns_when_nothing_matched() {
        let rendered = render_ingest(&summary(0));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No rows matched product \"pink morsel\""));
        }
    }

    #[test]
    fn requires_dataset_path() {
        assert!(render_ingest(&json!({})).is_err());
    }
}
