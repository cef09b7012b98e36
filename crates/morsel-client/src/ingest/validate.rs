use std::path::Path;

use rust_decimal::Decimal;

use crate::date::parse_source_date;
use crate::error::ParseIssue;
use crate::ingest::parse::ColumnRow;
use crate::money::parse_currency;
use crate::records::TransactionRecord;

pub(crate) const SOURCE_COLUMNS: [&str; 5] = ["product", "date", "region", "quantity", "price"];

const PRODUCT: usize = 0;
const DATE: usize = 1;
const REGION: usize = 2;
const QUANTITY: usize = 3;
const PRICE: usize = 4;

/// Normalizes raw source rows. Rows with any unparseable cell are left out
/// of the result and reported through `issues`; callers abort when `issues`
/// is non-empty.
pub(crate) fn normalize_rows(
    path: &Path,
    rows: Vec<ColumnRow>,
    issues: &mut Vec<ParseIssue>,
) -> Vec<TransactionRecord> {
    let file = path.display().to_string();
    let mut records = Vec::with_capacity(rows.len());

    for raw in rows {
        let mut row_issues = Vec::new();
        let date = parse_source_date(raw.value(DATE));
        if date.is_none() {
            row_issues.push(issue(&file, &raw, DATE, "calendar date (e.g. 2018-02-06)"));
        }
        let quantity = parse_quantity(raw.value(QUANTITY));
        if quantity.is_none() {
            row_issues.push(issue(&file, &raw, QUANTITY, "non-negative whole number"));
        }
        let price = parse_amount(raw.value(PRICE));
        if price.is_none() {
            row_issues.push(issue(&file, &raw, PRICE, "non-negative amount (e.g. $3.00)"));
        }

        if let (Some(date), Some(quantity), Some(price)) = (date, quantity, price) {
            records.push(TransactionRecord {
                source_file: file.clone(),
                source_row: raw.row,
                product: raw.value(PRODUCT).to_string(),
                date,
                region: raw.value(REGION).to_string(),
                quantity,
                price,
            });
        } else {
            issues.extend(row_issues);
        }
    }

    records
}

pub(crate) fn parse_quantity(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity >= 0)
}

pub(crate) fn parse_amount(value: &str) -> Option<Decimal> {
    parse_currency(value).filter(|amount| *amount >= Decimal::ZERO)
}

fn issue(file: &str, raw: &ColumnRow, index: usize, expected: &str) -> ParseIssue {
    ParseIssue {
        file: file.to_string(),
        row: raw.row,
        field: SOURCE_COLUMNS[index].to_string(),
        value: raw.value(index).to_string(),
        expected: expected.to_string(),
    }
}
