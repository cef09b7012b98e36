use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Fixed-width table; columns are as wide as their widest cell.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

pub fn text_field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn count_field(data: &Value, key: &str) -> i64 {
    data.get(key).and_then(Value::as_i64).unwrap_or(0)
}

/// "2018-02-05 to 2018-02-06", or "no data" when either end is missing.
pub fn date_span(range: Option<&Value>) -> String {
    let earliest = range
        .and_then(|value| value.get("earliest"))
        .and_then(Value::as_str);
    let latest = range
        .and_then(|value| value.get("latest"))
        .and_then(Value::as_str);
    match (earliest, latest) {
        (Some(earliest), Some(latest)) => format!("{earliest} to {latest}"),
        _ => "no data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Align, Column, date_span, key_value_rows, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[("Product", "pink morsel".to_string()), ("Rows", "5".to_string())],
            2,
        );
        assert_eq!(rows, vec!["  Product  pink morsel", "  Rows     5"]);
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let columns = [
            Column {
                name: "Date",
                align: Align::Left,
            },
            Column {
                name: "Value",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["2018-02-05".to_string(), "15".to_string()],
            vec!["2018-02-06".to_string(), "8".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(
            rendered,
            vec![
                "  Date        Value",
                "  2018-02-05     15",
                "  2018-02-06      8",
            ]
        );
    }

    #[test]
    fn date_span_needs_both_ends() {
        let full = json!({ "earliest": "2018-02-04", "latest": "2018-02-06" });
        assert_eq!(date_span(Some(&full)), "2018-02-04 to 2018-02-06");
        let empty = json!({ "earliest": null, "latest": null });
        assert_eq!(date_span(Some(&empty)), "no data");
        assert_eq!(date_span(None), "no data");
    }
}
