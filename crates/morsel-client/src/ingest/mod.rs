//! Batch ingestion: raw per-day CSV files in, derived sales dataset out.

pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod persist;
pub(crate) mod validate;

use std::path::{Path, PathBuf};

use crate::contracts::types::{ArtifactSummary, DataRange, IngestSummary, SourceFileSummary};
use crate::date::format_iso_date;
use crate::error::ParseIssue;
use crate::records::{SalesRecord, TransactionRecord};
use crate::settings::Settings;
use crate::{ClientError, ClientResult};

/// Every intermediate collection the pipeline produces, in order.
#[derive(Debug, Clone)]
pub struct PipelineStages {
    pub files: Vec<SourceFileSummary>,
    pub merged: Vec<TransactionRecord>,
    pub sorted: Vec<TransactionRecord>,
    pub filtered: Vec<TransactionRecord>,
    pub sales: Vec<SalesRecord>,
}

/// Merge, normalize, sort, filter to `target_product` and derive sales.
pub fn ingest(source_files: &[PathBuf], target_product: &str) -> ClientResult<Vec<SalesRecord>> {
    Ok(run_pipeline(source_files, target_product)?.sales)
}

pub fn run_pipeline(source_files: &[PathBuf], target_product: &str) -> ClientResult<PipelineStages> {
    let (files, merged) = merge_sources(source_files)?;
    let sorted = sort_by_date(merged.clone());
    let filtered = filter_product(&sorted, target_product);
    let sales = derive_sales(&filtered)?;

    tracing::info!(
        files = files.len(),
        rows_read = merged.len(),
        rows_matched = filtered.len(),
        product = target_product,
        "ingestion pipeline finished"
    );

    Ok(PipelineStages {
        files,
        merged,
        sorted,
        filtered,
        sales,
    })
}

/// Reads every file, in the order given. Schema problems abort on the first
/// file; value problems are collected across all files and reported together.
pub fn merge_sources(
    source_files: &[PathBuf],
) -> ClientResult<(Vec<SourceFileSummary>, Vec<TransactionRecord>)> {
    let mut files = Vec::with_capacity(source_files.len());
    let mut merged = Vec::new();
    let mut issues: Vec<ParseIssue> = Vec::new();

    for path in source_files {
        let content = input::read_source(path)?;
        let rows = parse::read_required_columns(path, &content, &validate::SOURCE_COLUMNS)?;
        let row_count = rows.len();
        merged.extend(validate::normalize_rows(path, rows, &mut issues));
        tracing::debug!(file = %path.display(), rows = row_count, "read source file");
        files.push(SourceFileSummary {
            path: path.display().to_string(),
            rows: row_count as i64,
        });
    }

    if !issues.is_empty() {
        tracing::warn!(issues = issues.len(), "source files contain unparseable values");
        return Err(ClientError::parse_failed(issues));
    }

    Ok((files, merged))
}

/// Stable: rows sharing a date keep their merge order.
pub fn sort_by_date(mut rows: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    rows.sort_by_key(|row| row.date);
    rows
}

/// Exact, case-sensitive product match.
pub fn filter_product(rows: &[TransactionRecord], target_product: &str) -> Vec<TransactionRecord> {
    rows.iter()
        .filter(|row| row.product == target_product)
        .cloned()
        .collect()
}

/// Rows whose `price × quantity` overflows are reported as `parse_error`
/// issues against the source row, and nothing is returned.
pub fn derive_sales(rows: &[TransactionRecord]) -> ClientResult<Vec<SalesRecord>> {
    let mut sales = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();
    for row in rows {
        match SalesRecord::derive(row) {
            Some(record) => sales.push(record),
            None => issues.push(ParseIssue {
                file: row.source_file.clone(),
                row: row.source_row,
                field: "price".to_string(),
                value: row.price.to_string(),
                expected: "amount small enough to multiply by quantity".to_string(),
            }),
        }
    }

    if !issues.is_empty() {
        tracing::warn!(issues = issues.len(), "sales amounts overflow");
        return Err(ClientError::parse_failed(issues));
    }
    Ok(sales)
}

/// The full batch run: discover inputs, run the pipeline, write artifacts.
pub(crate) fn execute(settings: &Settings) -> ClientResult<IngestSummary> {
    let source_files = input::discover_sources(&settings.data_dir)?;
    let stages = run_pipeline(&source_files, &settings.product)?;

    persist::ensure_output_dir(&settings.output_dir)?;
    let mut artifacts = Vec::new();
    if settings.write_intermediates {
        let merged_path = settings.output_dir.join(persist::MERGED_ARTIFACT);
        persist::write_transactions(&merged_path, &stages.merged)?;
        artifacts.push(artifact("merged", &merged_path, stages.merged.len()));

        let sorted_path = settings.output_dir.join(persist::SORTED_ARTIFACT);
        persist::write_transactions(&sorted_path, &stages.sorted)?;
        artifacts.push(artifact("sorted", &sorted_path, stages.sorted.len()));

        let filtered_path = settings
            .output_dir
            .join(persist::filtered_artifact_name(&settings.product));
        persist::write_transactions(&filtered_path, &stages.filtered)?;
        artifacts.push(artifact("filtered", &filtered_path, stages.filtered.len()));
    }

    if let Some(parent) = settings.dataset_path.parent() {
        persist::ensure_output_dir(parent)?;
    }
    persist::write_sales(&settings.dataset_path, &stages.sales)?;
    artifacts.push(artifact("sales", &settings.dataset_path, stages.sales.len()));

    tracing::info!(
        dataset = %settings.dataset_path.display(),
        rows = stages.sales.len(),
        "derived dataset written"
    );

    Ok(IngestSummary {
        product: settings.product.clone(),
        data_dir: settings.data_dir.display().to_string(),
        files: stages.files,
        rows_read: stages.merged.len() as i64,
        rows_matched: stages.sales.len() as i64,
        data_range: DataRange {
            earliest: stages.sales.first().map(|row| format_iso_date(&row.date)),
            latest: stages.sales.last().map(|row| format_iso_date(&row.date)),
        },
        artifacts,
        dataset_path: settings.dataset_path.display().to_string(),
    })
}

fn artifact(kind: &str, path: &Path, rows: usize) -> ArtifactSummary {
    ArtifactSummary {
        kind: kind.to_string(),
        path: path.display().to_string(),
        rows: rows as i64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::{filter_product, sort_by_date};
    use crate::records::TransactionRecord;

    fn record(row: i64, product: &str, day: u32) -> TransactionRecord {
        TransactionRecord {
            source_file: "a.csv".to_string(),
            source_row: row,
            product: product.to_string(),
            date: NaiveDate::from_ymd_opt(2018, 2, day).unwrap_or_default(),
            region: "north".to_string(),
            quantity: 1,
            price: dec!(3.00),
        }
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let rows = vec![
            record(1, "pink morsel", 6),
            record(2, "pink morsel", 5),
            record(3, "gold morsel", 6),
            record(4, "pink morsel", 5),
        ];

        let sorted = sort_by_date(rows);
        let order = sorted.iter().map(|row| row.source_row).collect::<Vec<i64>>();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn product_filter_is_exact_and_case_sensitive() {
        let rows = vec![
            record(1, "pink morsel", 5),
            record(2, "Pink Morsel", 5),
            record(3, "pink morsel ", 5),
        ];

        let filtered = filter_product(&rows, "pink morsel");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].source_row, 1);
    }
}
