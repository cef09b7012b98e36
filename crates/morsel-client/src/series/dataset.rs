use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::date::parse_dataset_date;
use crate::error::ParseIssue;
use crate::ingest::input::read_source;
use crate::ingest::parse::{ColumnRow, read_required_columns};
use crate::ingest::persist::SALES_COLUMNS;
use crate::ingest::validate::{parse_amount, parse_quantity};
use crate::records::SalesRecord;
use crate::series::aggregate;
use crate::series::types::{FilterRequest, SeriesPoint};
use crate::{ClientError, ClientResult};

const SALES: usize = 0;
const DATE: usize = 1;
const REGION: usize = 2;
const QUANTITY: usize = 3;
const PRICE: usize = 4;

/// The derived dataset, loaded once and never mutated. Share it behind an
/// `Arc` when several callers query it.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    source: Option<PathBuf>,
    rows: Vec<SalesRecord>,
    regions: Vec<String>,
}

impl SalesDataset {
    pub fn from_records(mut rows: Vec<SalesRecord>) -> Self {
        rows.sort_by_key(|row| row.date);
        let regions = rows
            .iter()
            .map(|row| row.region.to_lowercase())
            .filter(|region| !region.is_empty())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        Self {
            source: None,
            rows,
            regions,
        }
    }

    pub fn load(path: &Path) -> ClientResult<Self> {
        let content = read_source(path)?;
        let rows = read_required_columns(path, &content, &SALES_COLUMNS)?;

        let file = path.display().to_string();
        let mut issues = Vec::new();
        let mut records = Vec::with_capacity(rows.len());
        for raw in rows {
            if let Some(record) = parse_row(&file, &raw, &mut issues) {
                records.push(record);
            }
        }
        if !issues.is_empty() {
            return Err(ClientError::parse_failed(issues));
        }

        let mut dataset = Self::from_records(records);
        dataset.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            regions = dataset.regions.len(),
            "loaded sales dataset"
        );
        Ok(dataset)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn rows(&self) -> &[SalesRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct lower-cased region names, sorted.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some((first.date, last.date))
    }

    pub fn query(&self, request: &FilterRequest) -> ClientResult<Vec<SeriesPoint>> {
        aggregate::query(&self.rows, request)
    }
}

fn parse_row(file: &str, raw: &ColumnRow, issues: &mut Vec<ParseIssue>) -> Option<SalesRecord> {
    let before = issues.len();
    let sales = parse_amount(raw.value(SALES));
    if sales.is_none() {
        issues.push(issue(file, raw, SALES, "non-negative amount (e.g. $2469.00)"));
    }
    let date = parse_dataset_date(raw.value(DATE));
    if date.is_none() {
        issues.push(issue(file, raw, DATE, "YYYY-MM-DD"));
    }
    let quantity = parse_quantity(raw.value(QUANTITY));
    if quantity.is_none() {
        issues.push(issue(file, raw, QUANTITY, "non-negative whole number"));
    }
    let price = parse_amount(raw.value(PRICE));
    if price.is_none() {
        issues.push(issue(file, raw, PRICE, "non-negative amount (e.g. $3.00)"));
    }
    if issues.len() != before {
        return None;
    }

    Some(SalesRecord {
        date: date?,
        region: raw.value(REGION).to_string(),
        quantity: quantity?,
        price: price?,
        sales: sales?,
    })
}

fn issue(file: &str, raw: &ColumnRow, index: usize, expected: &str) -> ParseIssue {
    ParseIssue {
        file: file.to_string(),
        row: raw.row,
        field: SALES_COLUMNS[index].to_string(),
        value: raw.value(index).to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use super::SalesDataset;

    #[test]
    fn loads_currency_text_back_into_decimals() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let path = dir.path().join("sales.csv");
        let body = "sales,date,region,quantity,price\n\
                    $9.00,2018-02-06,North,3,$3.00\n\
                    $2469.00,2018-02-05,south,2,\"$1,234.50\"\n";
        assert!(fs::write(&path, body).is_ok());

        let dataset = SalesDataset::load(&path);
        assert!(dataset.is_ok());
        if let Ok(dataset) = dataset {
            assert_eq!(dataset.len(), 2);
            assert_eq!(dataset.rows()[0].sales, dec!(2469.00));
            assert_eq!(dataset.rows()[0].price, dec!(1234.50));
            assert_eq!(dataset.regions(), ["north".to_string(), "south".to_string()]);
            assert_eq!(dataset.source(), Some(path.as_path()));
            let range = dataset.date_range();
            assert!(range.is_some());
            if let Some((earliest, latest)) = range {
                assert!(earliest < latest);
            }
        }
    }

    #[test]
    fn bad_sales_text_is_parse_error() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let path = dir.path().join("sales.csv");
        let body = "sales,date,region,quantity,price\nlots,2018-02-06,north,3,$3.00\n";
        assert!(fs::write(&path, body).is_ok());

        let dataset = SalesDataset::load(&path);
        assert!(dataset.is_err());
        if let Err(error) = dataset {
            assert_eq!(error.code, "parse_error");
            assert!(error.message.contains("sales = \"lots\""));
        }
    }

    #[test]
    fn negative_quantity_in_dataset_is_parse_error() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let path = dir.path().join("sales.csv");
        let body = "sales,date,region,quantity,price
$0.00,2018-02-06,north,-3,$3.00
";
        assert!(fs::write(&path, body).is_ok());

        let dataset = SalesDataset::load(&path);
        assert!(dataset.is_err());
        if let Err(error) = dataset {
            assert_eq!(error.code, "parse_error");
            assert!(error.message.contains("quantity = \"-3\""));
        }
    }

    #[test]
    fn missing_dataset_is_source_not_found() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let dataset = SalesDataset::load(&dir.path().join("sales.csv"));
            assert!(dataset.is_err());
            if let Err(error) = dataset {
                assert_eq!(error.code, "source_not_found");
            }
        }
    }

    #[test]
    fn empty_dataset_has_no_range() {
        let dataset = SalesDataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.date_range().is_none());
        assert!(dataset.regions().is_empty());
    }
}
