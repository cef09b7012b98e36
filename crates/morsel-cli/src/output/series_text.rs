use std::io;

use morsel_client::money::CURRENCY_SYMBOL;
use serde_json::Value;

use super::format::{Align, Column, count_field, date_span, key_value_rows, render_table, text_field};

pub fn render_query(data: &Value) -> io::Result<String> {
    let metric = data
        .get("metric")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("query output requires metric"))?;
    let label = text_field(data, "metric_label");
    let region = text_field(data, "region");
    let start = text_field(data, "date_start");
    let end = text_field(data, "date_end");
    let points = data
        .get("points")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let region_text = if region == "all" {
        "all regions".to_string()
    } else {
        format!("region {region}")
    };
    let mut lines = vec![format!("{label} ({region_text}), {start} to {end}")];
    lines.push(String::new());

    if points.is_empty() {
        lines.push("  No sales matched this filter.".to_string());
    } else {
        lines.extend(render_table(
            &[
                Column {
                    name: "Date",
                    align: Align::Left,
                },
                Column {
                    name: label,
                    align: Align::Right,
                },
            ],
            &points
                .iter()
                .map(|point| {
                    vec![
                        text_field(point, "date").to_string(),
                        format_metric_value(metric, point.get("value")),
                    ]
                })
                .collect::<Vec<Vec<String>>>(),
        ));
    }

    if let Some(marker) = data.get("marker") {
        let marker_date = text_field(marker, "date");
        let placement = if !start.is_empty() && start <= marker_date && marker_date <= end {
            "inside"
        } else {
            "outside"
        };
        lines.push(String::new());
        lines.push(format!(
            "{} marker: {marker_date} ({placement} the selected dates)",
            text_field(marker, "label")
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_options(data: &Value) -> io::Result<String> {
    let metrics = data
        .get("metrics")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("options output requires metrics"))?;
    let regions = data
        .get("regions")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
                .join(", ")
        })
        .unwrap_or_default();

    let mut lines = vec![format!(
        "Chart options for {} ({} rows)",
        text_field(data, "dataset_path"),
        count_field(data, "rows")
    )];
    lines.push(String::new());
    lines.push("Metrics:".to_string());
    let metric_rows = metrics
        .iter()
        .map(|metric| (text_field(metric, "value"), text_field(metric, "label").to_string()))
        .collect::<Vec<(&str, String)>>();
    lines.extend(key_value_rows(&metric_rows, 2));
    lines.push(String::new());

    let marker = data.get("marker");
    lines.extend(key_value_rows(
        &[
            ("Regions", regions),
            ("Dates", date_span(data.get("data_range"))),
            (
                "Marker",
                format!(
                    "{} on {}",
                    marker.map(|value| text_field(value, "label")).unwrap_or(""),
                    marker.map(|value| text_field(value, "date")).unwrap_or("")
                ),
            ),
        ],
        0,
    ));

    Ok(lines.join("\n"))
}

pub fn render_serve(data: &Value) -> io::Result<String> {
    let url = data
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("serve output requires url"))?;

    Ok(format!(
        "Stopped serving {url} ({} rows from {}).",
        count_field(data, "rows"),
        text_field(data, "dataset_path")
    ))
}

fn format_metric_value(metric: &str, value: Option<&Value>) -> String {
    let number = value.and_then(Value::as_f64).unwrap_or(0.0);
    match metric {
        "quantity" => format!("{number:.0}"),
        _ => format!("{CURRENCY_SYMBOL}{number:.2}"),
    }
}
